//! Storage layer for household-cli
//!
//! JSON file storage with atomic writes, one repository per entity, and an
//! audit trail for every mutation made through [`Storage`].

pub mod chores;
pub mod expenses;
pub mod file_io;
pub mod members;
pub mod store;
pub mod templates;

pub use chores::ChoreRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use members::MemberRepository;
pub use store::HouseholdStore;
pub use templates::TemplateRepository;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::audit::{AuditEntry, AuditLog, Audited};
use crate::config::paths::HouseholdPaths;
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{
    Chore, ChoreId, Expense, ExpenseTemplate, Member, NewExpense, NewExpenseTemplate, TemplateId,
};

/// Map a poisoned lock into a storage error
pub(crate) fn lock_err<T>(err: std::sync::PoisonError<T>) -> HouseholdError {
    HouseholdError::Storage(format!("Lock poisoned: {}", err))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HouseholdPaths,
    audit: AuditLog,
    pub members: MemberRepository,
    pub chores: ChoreRepository,
    pub expenses: ExpenseRepository,
    pub templates: TemplateRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: HouseholdPaths) -> HouseholdResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLog::new(paths.audit_log()),
            members: MemberRepository::new(paths.members_file()),
            chores: ChoreRepository::new(paths.chores_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            templates: TemplateRepository::new(paths.templates_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &HouseholdPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> HouseholdResult<()> {
        self.members.load()?;
        self.chores.load()?;
        self.expenses.load()?;
        self.templates.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> HouseholdResult<()> {
        self.members.save()?;
        self.chores.save()?;
        self.expenses.save()?;
        self.templates.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Append to the audit trail
    ///
    /// Callers record only after the change is saved, so a failed append is
    /// logged and otherwise ignored: the change stands either way.
    pub fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.append(&entry) {
            warn!(action = %entry.action, error = %e, "Failed to write audit entry");
        }
    }

    pub fn record_added<T: Audited>(&self, record: &T) {
        self.record(AuditEntry::added(record));
    }

    pub fn record_changed<T: Audited>(&self, before: &T, after: &T) {
        if let Some(entry) = AuditEntry::changed(before, after) {
            self.record(entry);
        }
    }

    pub fn record_removed<T: Audited>(&self, record: &T) {
        self.record(AuditEntry::removed(record));
    }
}

/// Run a repository save, undoing the in-memory change if it fails, so a
/// record reported as failed is never written by a later save
fn save_or_undo(
    save: impl FnOnce() -> HouseholdResult<()>,
    undo: impl FnOnce() -> HouseholdResult<()>,
) -> HouseholdResult<()> {
    save().map_err(|e| {
        if let Err(undo_err) = undo() {
            warn!(error = %undo_err, "Failed to roll back unsaved change");
        }
        e
    })
}

impl HouseholdStore for Storage {
    fn list_members(&self) -> HouseholdResult<Vec<Member>> {
        self.members.get_all()
    }

    fn list_chores(&self) -> HouseholdResult<Vec<Chore>> {
        self.chores.get_all()
    }

    fn update_chore(
        &self,
        id: ChoreId,
        assigned_to: Option<String>,
        done: bool,
    ) -> HouseholdResult<Chore> {
        let before = self
            .chores
            .get(id)?
            .ok_or_else(|| HouseholdError::chore_not_found(id.to_string()))?;

        let mut chore = before.clone();
        chore.assigned_to = assigned_to;
        chore.done = done;

        self.chores.upsert(chore.clone())?;
        save_or_undo(
            || self.chores.save(),
            || self.chores.upsert(before.clone()),
        )?;

        self.record_changed(&before, &chore);
        Ok(chore)
    }

    fn list_expense_templates_due_on(
        &self,
        day_of_month: u32,
        weekday: &str,
    ) -> HouseholdResult<Vec<ExpenseTemplate>> {
        self.templates.get_due_on(day_of_month, weekday)
    }

    fn find_expense_by_template_and_date_range(
        &self,
        template_id: TemplateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HouseholdResult<Option<Expense>> {
        self.expenses
            .find_by_template_in_range(template_id, start, end)
    }

    fn create_expense(&self, expense: NewExpense) -> HouseholdResult<Expense> {
        let expense = Expense::from_new(expense);

        self.expenses.upsert(expense.clone())?;
        save_or_undo(
            || self.expenses.save(),
            || self.expenses.delete(expense.id).map(drop),
        )?;

        self.record_added(&expense);
        Ok(expense)
    }

    fn create_expense_template(
        &self,
        template: NewExpenseTemplate,
    ) -> HouseholdResult<ExpenseTemplate> {
        let template = ExpenseTemplate::from_new(template);
        template
            .validate()
            .map_err(|e| HouseholdError::Validation(e.to_string()))?;

        self.templates.upsert(template.clone())?;
        save_or_undo(
            || self.templates.save(),
            || self.templates.delete(template.id).map(drop),
        )?;

        self.record_added(&template);
        Ok(template)
    }
}
