//! Expense model
//!
//! A one-time charge fronted by `created_by` and owed by each assignee.
//! Expenses materialized from a recurring rule carry the rule's id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assignees::{self, Assignees};
use super::ids::{ExpenseId, TemplateId};
use super::money::Money;

/// A shared household expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub description: String,

    pub amount: Money,

    pub category: String,

    /// Members who owe this amount
    #[serde(default, deserialize_with = "assignees::deserialize_lenient")]
    pub assignees: Assignees,

    /// Member who paid up front and is owed
    pub created_by: String,

    #[serde(default)]
    pub paid: bool,

    pub created_at: DateTime<Utc>,

    /// Recurring rule this occurrence was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,
}

/// Fields for a new expense, as handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub assignees: Assignees,
    pub created_by: String,
    pub template_id: Option<TemplateId>,
    pub created_at: DateTime<Utc>,
}

impl NewExpense {
    /// Create a request stamped with the current time
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            assignees: Assignees::new(),
            created_by: created_by.into(),
            template_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_assignees(mut self, assignees: Assignees) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn from_template(mut self, template_id: TemplateId) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }
}

impl Expense {
    /// Materialize a stored expense from a creation request
    pub fn from_new(new: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            description: new.description,
            amount: new.amount,
            category: new.category,
            assignees: new.assignees,
            created_by: new.created_by,
            paid: false,
            created_at: new.created_at,
            template_id: new.template_id,
        }
    }

    /// Check if the member owes on this expense
    pub fn is_assigned_to(&self, member: &str) -> bool {
        self.assignees.contains(member)
    }

    /// Check if this expense was generated from a recurring rule
    pub fn is_occurrence(&self) -> bool {
        self.template_id.is_some()
    }

    /// Comma-separated assignee names, or `-` when unassigned
    pub fn assignee_list(&self) -> String {
        if self.assignees.is_empty() {
            "-".to_string()
        } else {
            self.assignees.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignees::from_names;

    #[test]
    fn test_from_new() {
        let template_id = TemplateId::new();
        let new = NewExpense::new("Internet", Money::from_cents(6000), "Utilities", "Mathew")
            .with_assignees(from_names(["Nathan"]))
            .from_template(template_id);

        let expense = Expense::from_new(new);

        assert!(!expense.paid);
        assert!(expense.is_occurrence());
        assert!(expense.is_assigned_to("Nathan"));
        assert!(!expense.is_assigned_to("Mathew"));
        assert_eq!(expense.assignee_list(), "Nathan");
    }

    #[test]
    fn test_deserialize_legacy_assignee_string() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Rent",
            "amount": 120000,
            "category": "Rent",
            "assignees": "[\"Brycen\",\"Michael\"]",
            "created_by": "Nathan",
            "created_at": "2025-03-01T12:00:00Z"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.assignees, from_names(["Brycen", "Michael"]));
        assert!(!expense.paid);
        assert!(expense.template_id.is_none());
    }

    #[test]
    fn test_deserialize_garbage_assignees() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Rent",
            "amount": 100,
            "category": "Rent",
            "assignees": "{oops",
            "created_by": "Nathan",
            "created_at": "2025-03-01T12:00:00Z"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.assignees.is_empty());
        assert_eq!(expense.assignee_list(), "-");
    }
}
