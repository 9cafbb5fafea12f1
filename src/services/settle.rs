//! Settling up
//!
//! A member settles an expense they owe by paying whoever fronted it. The
//! payer's Venmo handle is looked up first; only when there is somewhere to
//! send the money is the expense marked paid and a payment link produced.

use url::Url;

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Expense, Money};
use crate::storage::Storage;

use super::expense::{ExpenseFilter, ExpenseService};

/// A Venmo payment to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLink {
    pub recipient: String,
    pub amount: Money,
    pub note: String,
}

impl PaymentLink {
    /// Deep link that opens the Venmo app
    pub fn app_url(&self) -> HouseholdResult<Url> {
        let mut url = Url::parse("venmo://paycharge").map_err(link_err)?;
        url.query_pairs_mut()
            .append_pair("txn", "pay")
            .append_pair("recipients", &self.recipient)
            .append_pair("amount", &self.amount.to_decimal_string())
            .append_pair("note", &self.note);
        Ok(url)
    }

    /// Browser fallback for machines without the app
    pub fn web_url(&self) -> HouseholdResult<Url> {
        let mut url = Url::parse("https://venmo.com/").map_err(link_err)?;
        url.path_segments_mut()
            .map_err(|_| HouseholdError::Validation("Venmo URL cannot take a path".into()))?
            .pop_if_empty()
            .push(&self.recipient);
        url.query_pairs_mut()
            .append_pair("txn", "pay")
            .append_pair("amount", &self.amount.to_decimal_string())
            .append_pair("note", &self.note);
        Ok(url)
    }
}

fn link_err(err: url::ParseError) -> HouseholdError {
    HouseholdError::Validation(format!("Cannot build payment link: {}", err))
}

/// An expense marked paid, with the payment that settles it
#[derive(Debug, Clone)]
pub struct Settlement {
    pub expense: Expense,
    pub link: PaymentLink,
}

pub struct SettleService<'a> {
    storage: &'a Storage,
}

impl<'a> SettleService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Unpaid expenses `member` owes, newest first
    pub fn pending(&self, member: &str) -> HouseholdResult<Vec<Expense>> {
        ExpenseService::new(self.storage).list(&ExpenseFilter {
            assignee: Some(member.trim().to_string()),
            ..Default::default()
        })
    }

    /// Mark an expense paid and return the payment that settles it
    ///
    /// # Errors
    ///
    /// Not-found if the expense, its payer, or the payer's Venmo handle is
    /// missing; validation if it is already paid. The expense is left unpaid
    /// in every error case.
    pub fn settle(&self, identifier: &str) -> HouseholdResult<Settlement> {
        let expenses = ExpenseService::new(self.storage);
        let expense = expenses
            .find(identifier)?
            .ok_or_else(|| HouseholdError::expense_not_found(identifier))?;

        if expense.paid {
            return Err(HouseholdError::Validation(format!(
                "'{}' is already paid",
                expense.description
            )));
        }

        let payer = self
            .storage
            .members
            .get_by_name(&expense.created_by)?
            .ok_or_else(|| HouseholdError::member_not_found(&expense.created_by))?;
        let recipient = payer.venmo_username.ok_or(HouseholdError::NotFound {
            entity_type: "Venmo handle",
            identifier: payer.name,
        })?;

        let expense = expenses.set_paid(&expense.id.to_string(), true)?;
        let link = PaymentLink {
            recipient,
            amount: expense.amount,
            note: expense.description.clone(),
        };

        Ok(Settlement { expense, link })
    }
}
