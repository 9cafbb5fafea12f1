//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an index from
//! recurring rule to the occurrences generated from it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::HouseholdError;
use crate::models::{Expense, ExpenseId, TemplateId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a template index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: template_id -> occurrence ids
    by_template: RwLock<HashMap<TemplateId, Vec<ExpenseId>>>,
}

fn newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_template: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the template index
    pub fn load(&self) -> Result<(), HouseholdError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_template = self.by_template.write().map_err(lock_err)?;
        data.clear();
        by_template.clear();

        for expense in file_data.expenses {
            if let Some(template_id) = expense.template_id {
                by_template.entry(template_id).or_default().push(expense.id);
            }
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut expenses: Vec<_> = data.values().cloned().collect();
        newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// All expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut expenses: Vec<_> = data.values().cloned().collect();
        newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Occurrences generated from a recurring rule, newest first
    pub fn get_by_template(&self, template_id: TemplateId) -> Result<Vec<Expense>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_template = self.by_template.read().map_err(lock_err)?;

        let ids = by_template.get(&template_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        newest_first(&mut expenses);
        Ok(expenses)
    }

    /// First occurrence of a rule created within `[start, end)`
    pub fn find_by_template_in_range(
        &self,
        template_id: TemplateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<Expense>, HouseholdError> {
        Ok(self
            .get_by_template(template_id)?
            .into_iter()
            .find(|e| e.created_at >= start && e.created_at < end))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_template = self.by_template.write().map_err(lock_err)?;

        if let Some(old_template) = data.get(&expense.id).and_then(|old| old.template_id) {
            if let Some(ids) = by_template.get_mut(&old_template) {
                ids.retain(|&id| id != expense.id);
            }
        }
        if let Some(template_id) = expense.template_id {
            by_template.entry(template_id).or_default().push(expense.id);
        }

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_template = self.by_template.write().map_err(lock_err)?;

        let removed = data.remove(&id);
        if let Some(template_id) = removed.as_ref().and_then(|e| e.template_id) {
            if let Some(ids) = by_template.get_mut(&template_id) {
                ids.retain(|&eid| eid != id);
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn occurrence(template_id: TemplateId, at: DateTime<Utc>) -> Expense {
        Expense::from_new(
            NewExpense::new("Internet", Money::from_cents(6000), "Utilities", "Mathew")
                .from_template(template_id)
                .created_at(at),
        )
    }

    #[test]
    fn test_find_by_template_in_range_is_half_open() {
        let (_temp, repo) = create_test_repo();
        let template_id = TemplateId::new();
        let midnight = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        repo.upsert(occurrence(template_id, midnight)).unwrap();

        let prev_day = midnight - Duration::days(1);
        assert!(repo
            .find_by_template_in_range(template_id, prev_day, midnight)
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_template_in_range(template_id, midnight, midnight + Duration::days(1))
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_template_in_range(TemplateId::new(), midnight, midnight + Duration::days(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp, repo) = create_test_repo();
        let template_id = TemplateId::new();
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        repo.upsert(occurrence(template_id, early)).unwrap();
        repo.upsert(occurrence(template_id, late)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].created_at, late);
        assert_eq!(repo.get_by_template(template_id).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_updates_index() {
        let (_temp, repo) = create_test_repo();
        let template_id = TemplateId::new();
        let expense = occurrence(template_id, Utc::now());
        repo.upsert(expense.clone()).unwrap();

        assert!(repo.delete(expense.id).unwrap().is_some());
        assert!(repo.get_by_template(template_id).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_rebuilds_index() {
        let (temp, repo) = create_test_repo();
        let template_id = TemplateId::new();
        repo.upsert(occurrence(template_id, Utc::now())).unwrap();
        repo.save().unwrap();

        let reloaded = ExpenseRepository::new(temp.path().join("expenses.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_by_template(template_id).unwrap().len(), 1);
    }
}
