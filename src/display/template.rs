//! Recurring rule display formatting

use tabled::Tabled;

use crate::models::ExpenseTemplate;

use super::render_table;

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Owed By")]
    assignees: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn assignee_list(template: &ExpenseTemplate) -> String {
    if template.assignees.is_empty() {
        "-".to_string()
    } else {
        template
            .assignees
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn format_template_list(templates: &[ExpenseTemplate], currency: &str) -> String {
    if templates.is_empty() {
        return "No recurring expenses.".to_string();
    }

    let rows = templates
        .iter()
        .map(|t| TemplateRow {
            description: t.description.clone(),
            amount: t.amount.format_with_symbol(currency),
            category: t.category.clone(),
            schedule: t.schedule.to_string(),
            assignees: assignee_list(t),
            id: t.id.to_string(),
        })
        .collect();

    render_table(rows)
}

pub fn format_template_details(template: &ExpenseTemplate, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recurring expense: {}\n", template.description));
    output.push_str(&format!("  ID:         {}\n", template.id));
    output.push_str(&format!(
        "  Amount:     {}\n",
        template.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Category:   {}\n", template.category));
    output.push_str(&format!("  Schedule:   {}\n", template.schedule));
    output.push_str(&format!("  Owed by:    {}\n", assignee_list(template)));
    output.push_str(&format!("  Created by: {}\n", template.created_by));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpenseTemplate, Schedule};

    #[test]
    fn test_template_list() {
        let template = ExpenseTemplate::from_new(NewExpenseTemplate {
            description: "Cleaner".into(),
            amount: Money::from_cents(4000),
            category: "Household".into(),
            assignees: Default::default(),
            schedule: Schedule::weekly("Thursday"),
            created_by: "Brycen".into(),
        });

        let output = format_template_list(&[template.clone()], "$");
        assert!(output.contains("weekly on thursday"));
        assert!(output.contains("$40.00"));

        let details = format_template_details(&template, "$");
        assert!(details.contains("Owed by:    -"));
    }
}
