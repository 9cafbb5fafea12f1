//! Weekly chore rotation
//!
//! Each week every chore moves one member further along the member list.
//! Chore `i` goes to `members[(i + week) % members.len()]`, and every chore
//! starts the week undone.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Chore, Member};
use crate::storage::HouseholdStore;

use super::week::week_number_at;

/// How far the rotation has advanced for a given week
pub fn rotation_offset(week: u32, member_count: usize) -> usize {
    if member_count == 0 {
        return 0;
    }
    (week as usize) % member_count
}

/// Compute the assignments for a week without touching storage
///
/// Returns the chores in their original order with `assigned_to` set and
/// `done` cleared.
///
/// # Errors
///
/// Returns [`HouseholdError::NoMembers`] when `members` is empty, even if
/// there are no chores either.
pub fn plan_rotation(
    chores: &[Chore],
    members: &[Member],
    week: u32,
) -> HouseholdResult<Vec<Chore>> {
    if members.is_empty() {
        return Err(HouseholdError::NoMembers);
    }

    let offset = rotation_offset(week, members.len());
    Ok(chores
        .iter()
        .enumerate()
        .map(|(index, chore)| {
            let member = &members[(index + offset) % members.len()];
            let mut next = chore.clone();
            next.assign(Some(member.name.clone()));
            next
        })
        .collect())
}

/// Applies the weekly rotation through a [`HouseholdStore`]
pub struct ChoreRotationService<'a, S: HouseholdStore> {
    store: &'a S,
}

impl<'a, S: HouseholdStore> ChoreRotationService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reassign every chore for the given ISO week and persist the result
    pub fn assign_week(&self, week: u32) -> HouseholdResult<Vec<Chore>> {
        // Members are checked first so an empty household always reports it
        let members = self.store.list_members()?;
        if members.is_empty() {
            return Err(HouseholdError::NoMembers);
        }

        let chores = self.store.list_chores()?;
        if chores.is_empty() {
            debug!("No chores to rotate for week {}", week);
            return Ok(Vec::new());
        }

        let planned = plan_rotation(&chores, &members, week)?;
        let updated = planned
            .into_iter()
            .map(|chore| self.store.update_chore(chore.id, chore.assigned_to, false))
            .collect::<HouseholdResult<Vec<_>>>()?;

        info!(
            week,
            chores = updated.len(),
            members = members.len(),
            "Rotated chores"
        );
        Ok(updated)
    }

    /// Reassign chores for the week containing `now`
    pub fn assign_current<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> HouseholdResult<Vec<Chore>> {
        self.assign_week(week_number_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HouseholdPaths;
    use crate::storage::Storage;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn members(names: &[&str]) -> Vec<Member> {
        names.iter().map(|n| Member::new(*n)).collect()
    }

    fn assigned(chores: &[Chore]) -> Vec<&str> {
        chores
            .iter()
            .map(|c| c.assigned_to.as_deref().unwrap_or("-"))
            .collect()
    }

    #[test]
    fn test_week_five_three_members() {
        let chores = vec![Chore::new("c1"), Chore::new("c2"), Chore::new("c3")];
        let plan = plan_rotation(&chores, &members(&["A", "B", "C"]), 5).unwrap();

        assert_eq!(assigned(&plan), ["C", "A", "B"]);
        assert!(plan.iter().all(|c| !c.done));
    }

    #[test]
    fn test_rotation_formula_holds() {
        let roster = members(&["A", "B", "C", "D"]);
        let chores: Vec<_> = (0..6).map(|i| Chore::new(format!("c{}", i))).collect();

        for week in 1..=53 {
            let plan = plan_rotation(&chores, &roster, week).unwrap();
            let offset = rotation_offset(week, roster.len());
            assert_eq!(offset, week as usize % 4);
            for (i, chore) in plan.iter().enumerate() {
                assert_eq!(
                    chore.assigned_to.as_deref(),
                    Some(roster[(i + offset) % 4].name.as_str())
                );
            }
        }
    }

    #[test]
    fn test_more_members_than_chores() {
        let chores = vec![Chore::new("Dishes")];
        let plan = plan_rotation(&chores, &members(&["A", "B", "C"]), 4).unwrap();
        assert_eq!(assigned(&plan), ["B"]);
    }

    #[test]
    fn test_no_members_is_an_error() {
        let err = plan_rotation(&[Chore::new("Dishes")], &[], 1).unwrap_err();
        assert!(matches!(err, HouseholdError::NoMembers));
    }

    #[test]
    fn test_assign_week_persists() {
        let (_temp, storage) = create_test_storage();
        for name in ["A", "B", "C"] {
            storage.members.insert(Member::new(name)).unwrap();
        }
        for label in ["c1", "c2", "c3"] {
            let mut chore = Chore::new(label);
            chore.done = true;
            storage.chores.upsert(chore).unwrap();
        }

        let service = ChoreRotationService::new(&storage);
        let updated = service.assign_week(5).unwrap();
        assert_eq!(assigned(&updated), ["C", "A", "B"]);

        let stored = storage.chores.get_all().unwrap();
        assert_eq!(assigned(&stored), ["C", "A", "B"]);
        assert!(stored.iter().all(|c| !c.done));
    }

    #[test]
    fn test_empty_household_errors_before_chores() {
        let (_temp, storage) = create_test_storage();
        let service = ChoreRotationService::new(&storage);

        let err = service.assign_week(1).unwrap_err();
        assert!(matches!(err, HouseholdError::NoMembers));
    }

    #[test]
    fn test_no_chores_is_a_noop() {
        let (_temp, storage) = create_test_storage();
        storage.members.insert(Member::new("A")).unwrap();

        let service = ChoreRotationService::new(&storage);
        assert!(service.assign_current(&Utc::now()).unwrap().is_empty());
        assert!(storage.audit().entries().unwrap().is_empty());
    }
}
