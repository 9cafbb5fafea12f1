//! Expense split builder
//!
//! Turns one shared expense into a charge per assignee. Each share is the
//! total divided by the number of assignees, rounded up to the next cent, so
//! the shares can overshoot the total by a few cents but never fall short.
//! With a schedule attached, each charge becomes a recurring rule instead.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{BatchFailure, HouseholdError, HouseholdResult};
use crate::models::{
    AmountInput, Assignees, Expense, ExpenseTemplate, Money, NewExpense, NewExpenseTemplate,
    Schedule,
};
use crate::storage::HouseholdStore;

/// Label used for the single charge of an expense nobody was assigned to
const UNASSIGNED: &str = "(unassigned)";

/// A request to record a shared expense
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub description: String,
    pub amount: AmountInput,
    pub category: String,
    pub assignees: Assignees,
    pub created_by: String,
    /// Present when the expense should recur instead of being charged once
    pub schedule: Option<Schedule>,
}

/// One assignee's portion of a split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitShare {
    /// `None` for the single share of an unassigned expense
    pub assignee: Option<String>,
    pub amount: Money,
}

impl SplitShare {
    fn target(&self) -> &str {
        self.assignee.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// A validated split, ready to be written
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub description: String,
    pub category: String,
    pub created_by: String,
    pub total: Money,
    pub schedule: Option<Schedule>,
    pub shares: Vec<SplitShare>,
}

impl SplitPlan {
    /// Sum of all shares; at least `total`
    pub fn charged(&self) -> Money {
        self.shares.iter().map(|s| s.amount).sum()
    }
}

/// Validate a request and compute the per-assignee shares
///
/// Nothing is written. Any error here means no charge will be created.
pub fn build(request: &SplitRequest) -> HouseholdResult<SplitPlan> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(HouseholdError::Validation("Description is required".into()));
    }

    let total = request
        .amount
        .to_money()
        .map_err(|e| HouseholdError::Validation(e.to_string()))?;

    let schedule = match &request.schedule {
        Some(schedule) => {
            let mut schedule = schedule.clone();
            schedule.normalize();
            schedule
                .validate()
                .map_err(|e| HouseholdError::Validation(e.to_string()))?;
            Some(schedule)
        }
        None => None,
    };

    let targets: Vec<Option<String>> = if request.assignees.is_empty() {
        vec![None]
    } else {
        request.assignees.iter().cloned().map(Some).collect()
    };

    let share = total.ceil_share(targets.len());
    let shares = targets
        .into_iter()
        .map(|assignee| SplitShare {
            assignee,
            amount: share,
        })
        .collect();

    Ok(SplitPlan {
        description: description.to_string(),
        category: request.category.trim().to_string(),
        created_by: request.created_by.trim().to_string(),
        total,
        schedule,
        shares,
    })
}

/// A record written for one share
#[derive(Debug, Clone)]
pub enum SplitRecord {
    Expense(Expense),
    Template(ExpenseTemplate),
}

impl SplitRecord {
    pub fn amount(&self) -> Money {
        match self {
            Self::Expense(e) => e.amount,
            Self::Template(t) => t.amount,
        }
    }
}

/// Result of submitting a split
#[derive(Debug)]
pub struct SplitOutcome {
    pub created: Vec<SplitRecord>,
    pub failures: BatchFailure,
}

impl SplitOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The created records, or a [`HouseholdError::PartialBatch`] if any share
    /// failed (the records that were created stay created)
    pub fn into_result(self) -> HouseholdResult<Vec<SplitRecord>> {
        if self.failures.is_empty() {
            Ok(self.created)
        } else {
            Err(HouseholdError::PartialBatch(self.failures))
        }
    }
}

/// Writes split expenses through a [`HouseholdStore`]
pub struct ExpenseSplitService<'a, S: HouseholdStore> {
    store: &'a S,
}

impl<'a, S: HouseholdStore> ExpenseSplitService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validate, then create one expense (or recurring rule) per share
    ///
    /// Validation errors are returned before anything is written. After that,
    /// each share is attempted independently and failures are collected into
    /// the outcome.
    pub fn submit(&self, request: &SplitRequest) -> HouseholdResult<SplitOutcome> {
        let plan = build(request)?;
        Ok(self.write_plan(&plan))
    }

    fn write_plan(&self, plan: &SplitPlan) -> SplitOutcome {
        let mut created = Vec::with_capacity(plan.shares.len());
        let mut failures = BatchFailure::new(plan.shares.len());

        for share in &plan.shares {
            let assignees: Assignees = share.assignee.iter().cloned().collect();

            let result = match &plan.schedule {
                Some(schedule) => self
                    .store
                    .create_expense_template(NewExpenseTemplate {
                        description: plan.description.clone(),
                        amount: share.amount,
                        category: plan.category.clone(),
                        assignees,
                        schedule: schedule.clone(),
                        created_by: plan.created_by.clone(),
                    })
                    .map(SplitRecord::Template),
                None => self
                    .store
                    .create_expense(
                        NewExpense::new(
                            plan.description.clone(),
                            share.amount,
                            plan.category.clone(),
                            plan.created_by.clone(),
                        )
                        .with_assignees(assignees),
                    )
                    .map(SplitRecord::Expense),
            };

            match result {
                Ok(record) => created.push(record),
                Err(e) => {
                    warn!(assignee = share.target(), error = %e, "Failed to record share");
                    failures.push(share.target(), &e);
                }
            }
        }

        info!(
            description = %plan.description,
            total = %plan.total,
            created = created.len(),
            failed = failures.failures.len(),
            "Recorded split expense"
        );

        SplitOutcome { created, failures }
    }
}
