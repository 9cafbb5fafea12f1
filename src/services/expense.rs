//! Expense service
//!
//! Listing, settling and removing expenses. New expenses are recorded through
//! the [`split`](super::split) builder.

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Expense, TemplateId};
use crate::storage::Storage;

/// Filter for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses assigned to this member
    pub assignee: Option<String>,
    /// Only expenses created by this member
    pub created_by: Option<String>,
    /// Include paid expenses
    pub include_paid: bool,
    pub template_id: Option<TemplateId>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    fn accepts(&self, expense: &Expense) -> bool {
        if !self.include_paid && expense.paid {
            return false;
        }
        if let Some(name) = &self.assignee {
            if !expense.assignees.iter().any(|a| a.eq_ignore_ascii_case(name)) {
                return false;
            }
        }
        if let Some(name) = &self.created_by {
            if !expense.created_by.eq_ignore_ascii_case(name) {
                return false;
            }
        }
        if let Some(template_id) = self.template_id {
            if expense.template_id != Some(template_id) {
                return false;
            }
        }
        true
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Expenses matching `filter`, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> HouseholdResult<Vec<Expense>> {
        let matching = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| filter.accepts(e));

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    /// Find an expense by ID string
    pub fn find(&self, identifier: &str) -> HouseholdResult<Option<Expense>> {
        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .find(|e| e.id.matches(identifier)))
    }

    /// Mark an expense paid or unpaid
    pub fn set_paid(&self, identifier: &str, paid: bool) -> HouseholdResult<Expense> {
        let before = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::expense_not_found(identifier))?;

        if before.paid == paid {
            return Ok(before);
        }

        let mut expense = before.clone();
        expense.paid = paid;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.record_changed(&before, &expense);

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, identifier: &str) -> HouseholdResult<Expense> {
        let expense = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::expense_not_found(identifier))?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.record_removed(&expense);

        Ok(expense)
    }
}
