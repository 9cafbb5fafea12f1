//! Chore repository for JSON storage
//!
//! Chores are kept in creation order; the rotation depends on it.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HouseholdError;
use crate::models::{Chore, ChoreId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ChoreData {
    chores: Vec<Chore>,
}

/// Repository for chore persistence
pub struct ChoreRepository {
    path: PathBuf,
    data: RwLock<Vec<Chore>>,
}

impl ChoreRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), HouseholdError> {
        let mut file_data: ChoreData = read_json(&self.path)?;
        file_data.chores.sort_by_key(|c| c.created_at);

        let mut data = self.data.write().map_err(lock_err)?;
        *data = file_data.chores;
        Ok(())
    }

    pub fn save(&self) -> Result<(), HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let file_data = ChoreData {
            chores: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All chores, oldest first
    pub fn get_all(&self) -> Result<Vec<Chore>, HouseholdError> {
        Ok(self.data.read().map_err(lock_err)?.clone())
    }

    pub fn get(&self, id: ChoreId) -> Result<Option<Chore>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.iter().find(|c| c.id == id).cloned())
    }

    /// Insert a new chore at the end, or replace an existing one in place
    pub fn upsert(&self, chore: Chore) -> Result<(), HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        match data.iter_mut().find(|c| c.id == chore.id) {
            Some(slot) => *slot = chore,
            None => data.push(chore),
        }
        Ok(())
    }

    /// Remove a chore, returning it if it existed
    pub fn delete(&self, id: ChoreId) -> Result<Option<Chore>, HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        Ok(data
            .iter()
            .position(|c| c.id == id)
            .map(|index| data.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ChoreRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ChoreRepository::new(temp_dir.path().join("chores.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let (_temp, repo) = create_test_repo();
        let mut dishes = Chore::new("Dishes");
        repo.upsert(dishes.clone()).unwrap();
        repo.upsert(Chore::new("Trash")).unwrap();

        dishes.done = true;
        repo.upsert(dishes.clone()).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].label, "Dishes");
        assert!(all[0].done);
    }

    #[test]
    fn test_delete() {
        let (_temp, repo) = create_test_repo();
        let chore = Chore::new("Vacuum");
        repo.upsert(chore.clone()).unwrap();

        assert!(repo.delete(chore.id).unwrap().is_some());
        assert!(repo.delete(chore.id).unwrap().is_none());
        assert!(repo.get(chore.id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let (temp, repo) = create_test_repo();
        for label in ["Dishes", "Trash", "Bathroom"] {
            repo.upsert(Chore::new(label)).unwrap();
        }
        repo.save().unwrap();

        let reloaded = ChoreRepository::new(temp.path().join("chores.json"));
        reloaded.load().unwrap();

        let labels: Vec<_> = reloaded.get_all().unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Dishes", "Trash", "Bathroom"]);
    }
}
