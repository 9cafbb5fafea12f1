//! Expense CLI commands
//!
//! Adding an expense splits it across the listed members; with `--weekly` or
//! `--monthly` it is saved as a recurring rule instead.

use chrono::Utc;
use clap::Subcommand;
use tracing::warn;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{assignees, AmountInput, Assignees, Schedule};
use crate::reports::{BalanceDirection, BalanceReport, SpendingReport};
use crate::services::split::{SplitRecord, SplitRequest};
use crate::services::{
    ExpenseFilter, ExpenseService, ExpenseSplitService, MemberDirectory, SettleService,
};
use crate::storage::Storage;

/// Environment variable naming the member running the command
pub const USER_ENV: &str = "HOUSEHOLD_USER";

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a shared expense, split evenly between the listed members
    Add {
        /// What the money was spent on
        description: String,
        /// Total amount (e.g. "42.50" or "$1,200")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (defaults to the configured default)
        #[arg(short, long)]
        category: Option<String>,
        /// Members who owe a share (repeat or comma-separate)
        #[arg(short, long = "to", value_delimiter = ',')]
        to: Vec<String>,
        /// Member who paid
        #[arg(long, env = USER_ENV)]
        by: String,
        /// Repeat weekly on this day (e.g. "monday")
        #[arg(long, conflicts_with = "monthly")]
        weekly: Option<String>,
        /// Repeat monthly on this day of the month (1-31)
        #[arg(long)]
        monthly: Option<u32>,
    },
    /// List expenses, newest first
    List {
        /// Include paid expenses
        #[arg(short, long)]
        all: bool,
        /// Only expenses this member owes on
        #[arg(short, long)]
        member: Option<String>,
        /// Maximum number to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one expense
    Show {
        /// Expense ID
        expense: String,
    },
    /// Mark an expense as paid
    Pay {
        /// Expense ID
        expense: String,
        /// Mark as unpaid instead
        #[arg(long)]
        undo: bool,
    },
    /// Mark an expense paid and print a Venmo link to pay whoever fronted it
    Settle {
        /// Expense ID
        expense: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
    /// What a member owes
    Owe {
        #[arg(env = USER_ENV)]
        member: String,
    },
    /// What a member is owed
    Owed {
        #[arg(env = USER_ENV)]
        member: String,
    },
    /// Household spending by category
    Spending,
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> HouseholdResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            to,
            by,
            weekly,
            monthly,
        } => {
            let schedule = match (weekly, monthly) {
                (Some(day), _) => Some(Schedule::weekly(day)),
                (None, Some(day)) => Some(Schedule::monthly(day)),
                (None, None) => None,
            };

            let mut directory = MemberDirectory::new(storage, settings.cache_ttl());
            let now = Utc::now();
            let mut canonical = Vec::with_capacity(to.len());
            for name in assignees::from_names(&to) {
                match directory.canonical_name(now, &name)? {
                    Some(known) => canonical.push(known),
                    None => {
                        warn!(name = %name, "Assignee is not a household member");
                        canonical.push(name);
                    }
                }
            }
            let created_by = directory
                .canonical_name(now, &by)?
                .unwrap_or_else(|| by.trim().to_string());

            let request = SplitRequest {
                description,
                amount: AmountInput::Text(amount),
                category: category.unwrap_or_else(|| settings.default_category.clone()),
                assignees: canonical.into_iter().collect::<Assignees>(),
                created_by,
                schedule,
            };

            let outcome = ExpenseSplitService::new(storage).submit(&request)?;
            for record in &outcome.created {
                match record {
                    SplitRecord::Expense(e) => println!(
                        "Recorded {} for {} ({})",
                        e.amount.format_with_symbol(currency),
                        e.assignee_list(),
                        e.id
                    ),
                    SplitRecord::Template(t) => println!(
                        "Scheduled {} for {} {} ({})",
                        t.amount.format_with_symbol(currency),
                        if t.assignees.is_empty() {
                            "-".to_string()
                        } else {
                            t.assignees.iter().cloned().collect::<Vec<_>>().join(", ")
                        },
                        t.schedule,
                        t.id
                    ),
                }
            }
            outcome.into_result()?;
        }

        ExpenseCommands::List { all, member, limit } => {
            let filter = ExpenseFilter {
                assignee: member,
                include_paid: all,
                limit,
                ..Default::default()
            };
            let expenses = service.list(&filter)?;
            print!(
                "{}",
                format_expense_list(&expenses, currency, &settings.date_format)
            );
            if !expenses.is_empty() {
                println!();
            }
        }

        ExpenseCommands::Show { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| HouseholdError::expense_not_found(&expense))?;
            print!("{}", format_expense_details(&found, currency));
        }

        ExpenseCommands::Pay { expense, undo } => {
            let updated = service.set_paid(&expense, !undo)?;
            let state = if updated.paid { "paid" } else { "unpaid" };
            println!(
                "Marked '{}' ({}) as {}",
                updated.description,
                updated.amount.format_with_symbol(currency),
                state
            );
        }

        ExpenseCommands::Settle { expense } => {
            let settlement = SettleService::new(storage).settle(&expense)?;
            println!(
                "Marked '{}' ({}) as paid",
                settlement.expense.description,
                settlement.expense.amount.format_with_symbol(currency)
            );
            println!("  Pay {}:", settlement.expense.created_by);
            println!("  {}", settlement.link.app_url()?);
            println!("  {}", settlement.link.web_url()?);
        }

        ExpenseCommands::Delete { expense } => {
            let deleted = service.delete(&expense)?;
            println!("Deleted expense: {}", deleted.description);
        }

        ExpenseCommands::Owe { member } => {
            let report = BalanceReport::generate(storage, &member, BalanceDirection::Owes)?;
            print!("{}", report.format_terminal(currency));
        }

        ExpenseCommands::Owed { member } => {
            let report = BalanceReport::generate(storage, &member, BalanceDirection::IsOwed)?;
            print!("{}", report.format_terminal(currency));
        }

        ExpenseCommands::Spending => {
            let report = SpendingReport::generate(storage)?;
            print!("{}", report.format_terminal(currency));
        }
    }

    Ok(())
}
