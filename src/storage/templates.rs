//! Recurring rule repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HouseholdError;
use crate::models::{ExpenseTemplate, Frequency, TemplateId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TemplateData {
    templates: Vec<ExpenseTemplate>,
}

/// Repository for recurring rule persistence
pub struct TemplateRepository {
    path: PathBuf,
    data: RwLock<HashMap<TemplateId, ExpenseTemplate>>,
}

fn newest_first(templates: &mut [ExpenseTemplate]) {
    templates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

impl TemplateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), HouseholdError> {
        let file_data: TemplateData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        *data = file_data
            .templates
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
        Ok(())
    }

    pub fn save(&self) -> Result<(), HouseholdError> {
        let mut templates = self.get_all()?;
        newest_first(&mut templates);
        write_json_atomic(&self.path, &TemplateData { templates })
    }

    pub fn get(&self, id: TemplateId) -> Result<Option<ExpenseTemplate>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// All rules, newest first
    pub fn get_all(&self) -> Result<Vec<ExpenseTemplate>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut templates: Vec<_> = data.values().cloned().collect();
        newest_first(&mut templates);
        Ok(templates)
    }

    /// Rules scheduled for a given day of month or weekday name
    ///
    /// Matches monthly rules on `day_of_month` and weekly rules on the
    /// weekday name (case-insensitive).
    pub fn get_due_on(
        &self,
        day_of_month: u32,
        weekday: &str,
    ) -> Result<Vec<ExpenseTemplate>, HouseholdError> {
        let mut due: Vec<_> = self
            .get_all()?
            .into_iter()
            .filter(|t| match t.schedule.frequency {
                Frequency::Monthly => t.schedule.day_of_month == Some(day_of_month),
                Frequency::Weekly => t
                    .schedule
                    .day_of_week
                    .as_deref()
                    .is_some_and(|d| d.trim().eq_ignore_ascii_case(weekday.trim())),
            })
            .collect();
        // Oldest rule first, so occurrences are generated in a stable order
        due.reverse();
        Ok(due)
    }

    pub fn upsert(&self, template: ExpenseTemplate) -> Result<(), HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        data.insert(template.id, template);
        Ok(())
    }

    pub fn delete(&self, id: TemplateId) -> Result<Option<ExpenseTemplate>, HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        Ok(data.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignees, Money, NewExpenseTemplate, Schedule};
    use tempfile::TempDir;

    fn template(schedule: Schedule) -> ExpenseTemplate {
        ExpenseTemplate::from_new(NewExpenseTemplate {
            description: "Rule".into(),
            amount: Money::from_cents(1000),
            category: "Utilities".into(),
            assignees: Assignees::new(),
            schedule,
            created_by: "Nathan".into(),
        })
    }

    #[test]
    fn test_get_due_on() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TemplateRepository::new(temp_dir.path().join("templates.json"));
        let monthly = template(Schedule::monthly(15));
        let weekly = template(Schedule::weekly("Friday"));
        repo.upsert(monthly.clone()).unwrap();
        repo.upsert(weekly.clone()).unwrap();
        repo.upsert(template(Schedule::monthly(3))).unwrap();

        let due = repo.get_due_on(15, "friday").unwrap();
        assert_eq!(due.len(), 2);
        assert!(due.iter().any(|t| t.id == monthly.id));
        assert!(due.iter().any(|t| t.id == weekly.id));

        assert!(repo.get_due_on(16, "saturday").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("templates.json");
        let repo = TemplateRepository::new(path.clone());
        let rule = template(Schedule::weekly("monday"));
        repo.upsert(rule.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = TemplateRepository::new(path);
        reloaded.load().unwrap();
        let loaded = reloaded.get(rule.id).unwrap().unwrap();
        assert_eq!(loaded.schedule, rule.schedule);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TemplateRepository::new(temp_dir.path().join("templates.json"));
        let rule = template(Schedule::monthly(1));
        repo.upsert(rule.clone()).unwrap();

        assert!(repo.delete(rule.id).unwrap().is_some());
        assert!(repo.get_all().unwrap().is_empty());
    }
}
