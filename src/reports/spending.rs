//! Spending Report
//!
//! Household spending by category, with per-member and per-expense averages.

use std::collections::HashMap;

use crate::error::HouseholdResult;
use crate::models::{Expense, Money};
use crate::storage::Storage;

/// Spending in one category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Percentage of all spending
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Categories, largest total first
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub expense_count: usize,
    pub member_count: usize,
    /// Total divided evenly across members
    pub average_per_member: Money,
    pub average_expense: Money,
}

/// `total / count`, rounded to the nearest cent; zero when `count` is zero
fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::zero();
    }
    let count = count as i64;
    let cents = total.cents();
    let rounded = if cents >= 0 {
        (cents + count / 2) / count
    } else {
        (cents - count / 2) / count
    };
    Money::from_cents(rounded)
}

impl SpendingReport {
    /// Generate the report over every stored expense, paid or not
    pub fn generate(storage: &Storage) -> HouseholdResult<Self> {
        let expenses = storage.expenses.get_all()?;
        let member_count = storage.members.count()?;
        Ok(Self::from_expenses(&expenses, member_count))
    }

    pub fn from_expenses(expenses: &[Expense], member_count: usize) -> Self {
        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        for expense in expenses {
            let entry = by_category
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let total: Money = expenses.iter().map(|e| e.amount).sum();

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, (amount, count))| CategorySpending {
                category: category.to_string(),
                total: amount,
                count,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                },
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Self {
            categories,
            total,
            expense_count: expenses.len(),
            member_count,
            average_per_member: average(total, member_count),
            average_expense: average(total, expenses.len()),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Household Spending\n");
        output.push_str(&"=".repeat(56));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent: {}\n",
            self.total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Avg / Member: {} ({} members)\n",
            self.average_per_member.format_with_symbol(currency),
            self.member_count
        ));
        output.push_str(&format!("Expenses: {}\n", self.expense_count));
        output.push_str(&format!(
            "Avg Expense: {}\n\n",
            self.average_expense.format_with_symbol(currency)
        ));

        output.push_str(&format!(
            "{:<28} {:>12} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>12} {:>6} {:>6.1}%\n",
                category.category,
                category.total.format_with_symbol(currency),
                category.count,
                category.percentage
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn expense(amount: i64, category: &str) -> Expense {
        Expense::from_new(NewExpense::new(
            "Item",
            Money::from_cents(amount),
            category,
            "Mathew",
        ))
    }

    #[test]
    fn test_totals_and_averages() {
        let expenses = vec![
            expense(120000, "Rent"),
            expense(4500, "Groceries"),
            expense(3000, "Groceries"),
            expense(6000, "Internet"),
        ];
        let report = SpendingReport::from_expenses(&expenses, 4);

        assert_eq!(report.total.cents(), 133500);
        assert_eq!(report.expense_count, 4);
        assert_eq!(report.average_per_member.cents(), 33375);
        assert_eq!(report.average_expense.cents(), 33375);

        assert_eq!(report.categories[0].category, "Rent");
        let groceries = report
            .categories
            .iter()
            .find(|c| c.category == "Groceries")
            .unwrap();
        assert_eq!(groceries.total.cents(), 7500);
        assert_eq!(groceries.count, 2);
    }

    #[test]
    fn test_average_rounds_to_nearest_cent() {
        assert_eq!(average(Money::from_cents(1000), 3).cents(), 333);
        assert_eq!(average(Money::from_cents(2000), 3).cents(), 667);
        assert_eq!(average(Money::from_cents(500), 0).cents(), 0);
    }

    #[test]
    fn test_empty() {
        let report = SpendingReport::from_expenses(&[], 0);
        assert!(report.total.is_zero());
        assert!(report.categories.is_empty());
        assert!(report.format_terminal("$").contains("Total Spent: $0.00"));
    }
}
