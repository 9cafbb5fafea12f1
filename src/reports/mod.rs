//! Reports module for household-cli
//!
//! Per-member balances (who owes, who is owed) and household spending by
//! category.

pub mod balances;
pub mod spending;

pub use balances::{BalanceDirection, BalanceReport};
pub use spending::{CategorySpending, SpendingReport};
