//! Recurring rule service
//!
//! Listing, rescheduling and removing recurring expense rules. Rules are
//! created through the [`split`](super::split) builder.

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Expense, ExpenseTemplate, SchedulePatch};
use crate::storage::Storage;

/// Service for recurring rule management
pub struct TemplateService<'a> {
    storage: &'a Storage,
}

impl<'a> TemplateService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All rules, newest first
    pub fn list(&self) -> HouseholdResult<Vec<ExpenseTemplate>> {
        self.storage.templates.get_all()
    }

    pub fn find(&self, identifier: &str) -> HouseholdResult<Option<ExpenseTemplate>> {
        Ok(self
            .storage
            .templates
            .get_all()?
            .into_iter()
            .find(|t| t.id.matches(identifier)))
    }

    /// Occurrences already generated from a rule
    pub fn occurrences(&self, identifier: &str) -> HouseholdResult<Vec<Expense>> {
        let template = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::template_not_found(identifier))?;
        self.storage.expenses.get_by_template(template.id)
    }

    /// Change when a rule fires
    ///
    /// The patched schedule is normalized and revalidated, so switching to
    /// monthly requires a day of month and switching to weekly a weekday.
    pub fn reschedule(
        &self,
        identifier: &str,
        patch: &SchedulePatch,
    ) -> HouseholdResult<ExpenseTemplate> {
        if patch.is_empty() {
            return Err(HouseholdError::Validation(
                "Nothing to update: give a frequency, day of month or day of week".into(),
            ));
        }

        let before = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::template_not_found(identifier))?;

        let schedule = patch
            .apply(&before.schedule)
            .map_err(|e| HouseholdError::Validation(e.to_string()))?;

        let mut template = before.clone();
        template.schedule = schedule;

        self.storage.templates.upsert(template.clone())?;
        self.storage.templates.save()?;

        self.storage.record_changed(&before, &template);

        Ok(template)
    }

    /// Delete a rule; occurrences already generated are kept
    pub fn delete(&self, identifier: &str) -> HouseholdResult<ExpenseTemplate> {
        let template = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::template_not_found(identifier))?;

        self.storage.templates.delete(template.id)?;
        self.storage.templates.save()?;

        self.storage.record_removed(&template);

        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HouseholdPaths;
    use crate::models::{Frequency, Money, NewExpenseTemplate, Schedule};
    use crate::storage::HouseholdStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, ExpenseTemplate) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let rule = storage
            .create_expense_template(NewExpenseTemplate {
                description: "Internet".into(),
                amount: Money::from_cents(6000),
                category: "Internet".into(),
                assignees: Default::default(),
                schedule: Schedule::weekly("friday"),
                created_by: "Nathan".into(),
            })
            .unwrap();
        (temp_dir, storage, rule)
    }

    #[test]
    fn test_reschedule_to_monthly() {
        let (_temp, storage, rule) = setup();
        let service = TemplateService::new(&storage);

        let updated = service
            .reschedule(
                &rule.id.to_string(),
                &SchedulePatch {
                    frequency: Some(Frequency::Monthly),
                    day_of_month: Some(12),
                    day_of_week: None,
                },
            )
            .unwrap();

        assert_eq!(updated.schedule, Schedule::monthly(12));
        assert_eq!(
            storage.templates.get(rule.id).unwrap().unwrap().schedule,
            Schedule::monthly(12)
        );
    }

    #[test]
    fn test_reschedule_rejects_invalid() {
        let (_temp, storage, rule) = setup();
        let service = TemplateService::new(&storage);
        let id = rule.id.to_string();

        assert!(service
            .reschedule(&id, &SchedulePatch::default())
            .unwrap_err()
            .is_validation());

        let err = service
            .reschedule(
                &id,
                &SchedulePatch {
                    day_of_week: Some("Caturday".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            storage.templates.get(rule.id).unwrap().unwrap().schedule,
            Schedule::weekly("friday")
        );
    }

    #[test]
    fn test_delete() {
        let (_temp, storage, rule) = setup();
        let service = TemplateService::new(&storage);

        service.delete(&rule.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service
            .occurrences(&rule.id.to_string())
            .unwrap_err()
            .is_not_found());
    }
}
