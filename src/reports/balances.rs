//! Balance reports
//!
//! What a member owes (unpaid expenses they are assigned to) and what they
//! are owed (unpaid expenses they created).

use std::fmt;

use crate::error::HouseholdResult;
use crate::models::{Expense, Money};
use crate::storage::Storage;

/// Which side of the ledger a balance report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDirection {
    /// Expenses the member is assigned to
    Owes,
    /// Expenses the member created for others
    IsOwed,
}

impl fmt::Display for BalanceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owes => write!(f, "owes"),
            Self::IsOwed => write!(f, "is owed"),
        }
    }
}

/// Balance summary for one member
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub member: String,
    pub direction: BalanceDirection,
    /// Every matching expense, paid or not
    pub total: Money,
    /// Unpaid portion of `total`
    pub outstanding: Money,
    pub pending_count: usize,
    /// Categories of unpaid expenses, in first-seen order
    pub categories: Vec<String>,
    pub largest_pending: Money,
    /// Share of `total` already paid, 0-100
    pub percent_paid: f64,
    pub pending: Vec<Expense>,
}

impl BalanceReport {
    /// Build the report from every stored expense
    pub fn generate(
        storage: &Storage,
        member: &str,
        direction: BalanceDirection,
    ) -> HouseholdResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self::from_expenses(&expenses, member, direction))
    }

    pub fn from_expenses(expenses: &[Expense], member: &str, direction: BalanceDirection) -> Self {
        let member = member.trim();
        let relevant: Vec<&Expense> = expenses
            .iter()
            .filter(|e| match direction {
                BalanceDirection::Owes => {
                    e.assignees.iter().any(|a| a.eq_ignore_ascii_case(member))
                }
                BalanceDirection::IsOwed => e.created_by.eq_ignore_ascii_case(member),
            })
            .collect();

        let total: Money = relevant.iter().map(|e| e.amount).sum();
        let pending: Vec<Expense> = relevant
            .iter()
            .filter(|e| !e.paid)
            .map(|e| (*e).clone())
            .collect();
        let outstanding: Money = pending.iter().map(|e| e.amount).sum();

        let mut categories: Vec<String> = Vec::new();
        for expense in &pending {
            if !categories.contains(&expense.category) {
                categories.push(expense.category.clone());
            }
        }

        let largest_pending = pending
            .iter()
            .map(|e| e.amount)
            .max()
            .unwrap_or_default();

        let percent_paid = if total.is_positive() {
            (total - outstanding).cents() as f64 / total.cents() as f64 * 100.0
        } else {
            0.0
        };

        Self {
            member: member.to_string(),
            direction,
            total,
            outstanding,
            pending_count: pending.len(),
            categories,
            largest_pending,
            percent_paid,
            pending,
        }
    }

    /// One-paragraph summary for the terminal
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format!(
            "{} {} {}\n",
            self.member,
            self.direction,
            self.outstanding.format_with_symbol(currency)
        );

        if self.pending_count == 0 {
            output.push_str("All settled up.\n");
        } else {
            output.push_str(&format!(
                "{} pending {}, largest {}\n",
                self.pending_count,
                if self.pending_count == 1 { "item" } else { "items" },
                self.largest_pending.format_with_symbol(currency)
            ));
            output.push_str(&format!("Categories: {}\n", self.categories.join(", ")));
        }
        output.push_str(&format!("{:.0}% paid\n", self.percent_paid));

        output
    }
}
