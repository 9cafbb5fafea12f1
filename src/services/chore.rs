//! Chore service
//!
//! Creating, toggling and deleting chores. Weekly assignment lives in
//! [`rotation`](super::rotation).

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::Chore;
use crate::storage::{HouseholdStore, Storage};

/// Service for chore management
pub struct ChoreService<'a> {
    storage: &'a Storage,
}

impl<'a> ChoreService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new, unassigned chore
    pub fn create(&self, label: &str) -> HouseholdResult<Chore> {
        let chore = Chore::new(label);
        chore.validate().map_err(HouseholdError::Validation)?;

        self.storage.chores.upsert(chore.clone())?;
        self.storage.chores.save()?;

        self.storage.record_added(&chore);

        Ok(chore)
    }

    /// All chores in creation order
    pub fn list(&self) -> HouseholdResult<Vec<Chore>> {
        self.storage.chores.get_all()
    }

    /// Find a chore by ID or label (case-insensitive)
    pub fn find(&self, identifier: &str) -> HouseholdResult<Option<Chore>> {
        let chores = self.storage.chores.get_all()?;
        if let Some(chore) = chores.iter().find(|c| c.id.matches(identifier)) {
            return Ok(Some(chore.clone()));
        }

        let wanted = identifier.trim().to_lowercase();
        Ok(chores.into_iter().find(|c| c.label.to_lowercase() == wanted))
    }

    /// Flip a chore's done flag
    pub fn toggle(&self, identifier: &str) -> HouseholdResult<Chore> {
        let chore = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::chore_not_found(identifier))?;

        self.storage
            .update_chore(chore.id, chore.assigned_to, !chore.done)
    }

    /// Delete a chore
    pub fn delete(&self, identifier: &str) -> HouseholdResult<Chore> {
        let chore = self
            .find(identifier)?
            .ok_or_else(|| HouseholdError::chore_not_found(identifier))?;

        self.storage.chores.delete(chore.id)?;
        self.storage.chores.save()?;

        self.storage.record_removed(&chore);

        Ok(chore)
    }
}
