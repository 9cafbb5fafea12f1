//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::Tabled;

use crate::models::Expense;

use super::render_table;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "From")]
    created_by: String,
    #[tabled(rename = "Owed By")]
    assignees: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            date: e.created_at.format(date_format).to_string(),
            description: e.description.clone(),
            category: e.category.clone(),
            amount: e.amount.format_with_symbol(currency),
            created_by: e.created_by.clone(),
            assignees: e.assignee_list(),
            status: match (e.paid, e.is_occurrence()) {
                (true, _) => "paid".to_string(),
                (false, true) => "due (recurring)".to_string(),
                (false, false) => "due".to_string(),
            },
            id: e.id.to_string(),
        })
        .collect();

    render_table(rows)
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:         {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:     {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Category:   {}\n", expense.category));
    output.push_str(&format!("  Created by: {}\n", expense.created_by));
    output.push_str(&format!("  Owed by:    {}\n", expense.assignee_list()));
    output.push_str(&format!(
        "  Paid:       {}\n",
        if expense.paid { "Yes" } else { "No" }
    ));
    if let Some(template_id) = expense.template_id {
        output.push_str(&format!("  Recurring:  {}\n", template_id));
    }
    output.push_str(&format!(
        "  Created:    {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{assignees, Money, NewExpense, TemplateId};

    fn sample() -> Expense {
        Expense::from_new(
            NewExpense::new("Internet", Money::from_cents(2000), "Utilities", "Nathan")
                .with_assignees(assignees::from_names(["Mathew", "Michael"]))
                .from_template(TemplateId::new()),
        )
    }

    #[test]
    fn test_expense_list() {
        let output = format_expense_list(&[sample()], "$", "%Y-%m-%d");

        assert!(output.contains("Internet"));
        assert!(output.contains("$20.00"));
        assert!(output.contains("Mathew, Michael"));
        assert!(output.contains("due (recurring)"));
    }

    #[test]
    fn test_expense_details() {
        let output = format_expense_details(&sample(), "€");

        assert!(output.contains("Amount:     €20.00"));
        assert!(output.contains("Recurring:  tpl-"));
    }
}
