//! Persistence contract used by the rotation, split and recurrence services
//!
//! The services only ever see this trait, so they can run against the JSON
//! [`Storage`](super::Storage) or against an in-memory double in tests.

use chrono::{DateTime, Utc};

use crate::error::HouseholdResult;
use crate::models::{
    Chore, ChoreId, Expense, ExpenseTemplate, Member, NewExpense, NewExpenseTemplate, TemplateId,
};

pub trait HouseholdStore {
    /// Members in rotation order
    fn list_members(&self) -> HouseholdResult<Vec<Member>>;

    /// Chores in creation order
    fn list_chores(&self) -> HouseholdResult<Vec<Chore>>;

    /// Set a chore's assignee and done flag, returning the updated chore
    fn update_chore(
        &self,
        id: ChoreId,
        assigned_to: Option<String>,
        done: bool,
    ) -> HouseholdResult<Chore>;

    /// Recurring rules that fire on the given day of month or weekday name
    fn list_expense_templates_due_on(
        &self,
        day_of_month: u32,
        weekday: &str,
    ) -> HouseholdResult<Vec<ExpenseTemplate>>;

    /// An occurrence of `template_id` created in `[start, end)`, if any
    fn find_expense_by_template_and_date_range(
        &self,
        template_id: TemplateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HouseholdResult<Option<Expense>>;

    fn create_expense(&self, expense: NewExpense) -> HouseholdResult<Expense>;

    fn create_expense_template(
        &self,
        template: NewExpenseTemplate,
    ) -> HouseholdResult<ExpenseTemplate>;
}
