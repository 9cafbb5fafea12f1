//! CSV Export functionality
//!
//! Exports expenses and recurring rules as spreadsheet-friendly CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::HouseholdResult;
use crate::models::{Expense, ExpenseTemplate};
use crate::storage::Storage;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Created")]
    created: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Created By")]
    created_by: &'a str,
    #[serde(rename = "Assignees")]
    assignees: String,
    #[serde(rename = "Paid")]
    paid: bool,
    #[serde(rename = "Recurring Rule")]
    template_id: String,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            created: expense.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            description: &expense.description,
            category: &expense.category,
            amount: expense.amount.to_decimal_string(),
            created_by: &expense.created_by,
            assignees: expense
                .assignees
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(";"),
            paid: expense.paid,
            template_id: expense
                .template_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct TemplateRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Schedule")]
    schedule: String,
    #[serde(rename = "Created By")]
    created_by: &'a str,
    #[serde(rename = "Assignees")]
    assignees: String,
}

impl<'a> From<&'a ExpenseTemplate> for TemplateRow<'a> {
    fn from(template: &'a ExpenseTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            description: &template.description,
            category: &template.category,
            amount: template.amount.to_decimal_string(),
            schedule: template.schedule.to_string(),
            created_by: &template.created_by,
            assignees: template
                .assignees
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

/// Export all expenses, newest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> HouseholdResult<()> {
    let expenses = storage.expenses.get_all()?;
    write_expenses(&expenses, writer)
}

/// Write expenses as CSV with a header row
pub fn write_expenses<W: Write>(expenses: &[Expense], writer: W) -> HouseholdResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for expense in expenses {
        csv_writer.serialize(ExpenseRow::from(expense))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export all recurring rules
pub fn export_templates_csv<W: Write>(storage: &Storage, writer: W) -> HouseholdResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for template in storage.templates.get_all()? {
        csv_writer.serialize(TemplateRow::from(&template))?;
    }
    csv_writer.flush()?;
    Ok(())
}
