//! Core data models for household-cli
//!
//! Members, chores, shared expenses and the recurring rules that generate
//! expenses.

pub mod assignees;
pub mod chore;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod template;

pub use assignees::Assignees;
pub use chore::Chore;
pub use expense::{Expense, NewExpense};
pub use ids::{ChoreId, ExpenseId, MemberId, TemplateId};
pub use member::Member;
pub use money::{AmountInput, Money, MoneyParseError};
pub use template::{
    parse_weekday_name, weekday_name, ExpenseTemplate, Frequency, NewExpenseTemplate, Schedule,
    SchedulePatch, TemplateValidationError,
};
