//! Recurring expense materializer
//!
//! Meant to run once a day. Every recurring rule due today gets exactly one
//! expense occurrence stamped with the rule's id; running again the same day
//! finds the existing occurrence and creates nothing.
//!
//! The check-then-create is not atomic, so only one run may be in flight at a
//! time.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::error::{BatchFailure, HouseholdError, HouseholdResult};
use crate::models::{weekday_name, Expense, ExpenseTemplate, NewExpense, TemplateId};
use crate::storage::HouseholdStore;

/// Where a recurring rule stands for a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateState {
    DueToday,
    NotDue,
    AlreadyMaterialized,
}

/// Start and end (exclusive) of a local calendar day, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayBounds {
    /// Bounds of the calendar day containing `now`, in `now`'s time zone
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> HouseholdResult<Self> {
        let today = now.date_naive();
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| HouseholdError::Validation(format!("No day after {}", today)))?;

        Ok(Self {
            start: local_midnight(now, today)?,
            end: local_midnight(now, tomorrow)?,
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// First instant of `date` in `now`'s zone
///
/// When midnight is skipped by a DST jump, the current offset is used instead.
fn local_midnight<Tz: TimeZone>(
    now: &DateTime<Tz>,
    date: NaiveDate,
) -> HouseholdResult<DateTime<Utc>> {
    let naive = date.and_time(NaiveTime::MIN);
    if let Some(local) = now.timezone().from_local_datetime(&naive).earliest() {
        return Ok(local.with_timezone(&Utc));
    }

    now.offset()
        .fix()
        .from_local_datetime(&naive)
        .single()
        .map(|fixed| fixed.with_timezone(&Utc))
        .ok_or_else(|| HouseholdError::Validation(format!("Cannot resolve midnight of {}", date)))
}

/// Summary of one materializer run
#[derive(Debug)]
pub struct MaterializeReport {
    /// The local calendar day the run covered
    pub date: NaiveDate,
    /// Rules returned by the store as candidates for today
    pub considered: usize,
    pub created: Vec<Expense>,
    /// Rules that already had an occurrence today
    pub already_materialized: Vec<TemplateId>,
    pub not_due: Vec<TemplateId>,
    pub failures: BatchFailure,
}

impl MaterializeReport {
    fn new(date: NaiveDate, considered: usize) -> Self {
        Self {
            date,
            considered,
            created: Vec::new(),
            already_materialized: Vec::new(),
            not_due: Vec::new(),
            failures: BatchFailure::new(considered),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Generates today's occurrences of recurring expenses
pub struct RecurrenceMaterializer<'a, S: HouseholdStore> {
    store: &'a S,
}

impl<'a, S: HouseholdStore> RecurrenceMaterializer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Classify a rule for the day described by `bounds`
    pub fn state_of(
        &self,
        template: &ExpenseTemplate,
        today: NaiveDate,
        bounds: &DayBounds,
    ) -> HouseholdResult<TemplateState> {
        if !template.is_due_on(today) {
            return Ok(TemplateState::NotDue);
        }

        let existing = self.store.find_expense_by_template_and_date_range(
            template.id,
            bounds.start,
            bounds.end,
        )?;
        Ok(match existing {
            Some(_) => TemplateState::AlreadyMaterialized,
            None => TemplateState::DueToday,
        })
    }

    /// Create today's occurrences
    ///
    /// `now` decides both which rules are due and the calendar day used for
    /// the duplicate check. A failure on one rule is logged and recorded in
    /// the report; the remaining rules are still processed. Only a failure to
    /// list the rules aborts the run.
    pub fn run<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> HouseholdResult<MaterializeReport> {
        let today = now.date_naive();
        let bounds = DayBounds::containing(now)?;
        let weekday = weekday_name(today.weekday());

        let templates = self
            .store
            .list_expense_templates_due_on(today.day(), weekday)?;
        let mut report = MaterializeReport::new(today, templates.len());
        let stamp = now.with_timezone(&Utc);

        for template in &templates {
            match self.state_of(template, today, &bounds) {
                Ok(TemplateState::NotDue) => {
                    debug!(template = %template.id, "Rule not due today");
                    report.not_due.push(template.id);
                }
                Ok(TemplateState::AlreadyMaterialized) => {
                    debug!(template = %template.id, "Occurrence already exists for today");
                    report.already_materialized.push(template.id);
                }
                Ok(TemplateState::DueToday) => {
                    match self.store.create_expense(occurrence_of(template, stamp)) {
                        Ok(expense) => report.created.push(expense),
                        Err(e) => {
                            warn!(
                                template = %template.id,
                                error = %e,
                                "Failed to create occurrence"
                            );
                            report.failures.push(template.id.to_string(), &e);
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        template = %template.id,
                        error = %e,
                        "Failed to check for existing occurrence"
                    );
                    report.failures.push(template.id.to_string(), &e);
                }
            }
        }

        info!(
            date = %today,
            considered = report.considered,
            created = report.created.len(),
            skipped = report.already_materialized.len(),
            failed = report.failures.failures.len(),
            "Generated recurring expenses"
        );
        Ok(report)
    }
}

/// The expense a rule produces, stamped at `at`
fn occurrence_of(template: &ExpenseTemplate, at: DateTime<Utc>) -> NewExpense {
    NewExpense::new(
        template.description.clone(),
        template.amount,
        template.category.clone(),
        template.created_by.clone(),
    )
    .with_assignees(template.assignees.clone())
    .from_template(template.id)
    .created_at(at)
}
