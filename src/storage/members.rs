//! Member repository for JSON storage
//!
//! Manages loading and saving household members to members.json. Members are
//! kept in join order, which is the order chores rotate through.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HouseholdError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<Vec<Member>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), HouseholdError> {
        let mut file_data: MemberData = read_json(&self.path)?;
        // Stable sort keeps file order for members created in the same instant
        file_data.members.sort_by_key(|m| m.created_at);

        let mut data = self.data.write().map_err(lock_err)?;
        *data = file_data.members;
        Ok(())
    }

    pub fn save(&self) -> Result<(), HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        let file_data = MemberData {
            members: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All members in join order
    pub fn get_all(&self) -> Result<Vec<Member>, HouseholdError> {
        Ok(self.data.read().map_err(lock_err)?.clone())
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.iter().find(|m| m.id == id).cloned())
    }

    /// Find a member by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, HouseholdError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.iter().find(|m| m.is_named(name)).cloned())
    }

    /// Add a new member; names must be unique
    pub fn insert(&self, member: Member) -> Result<(), HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        if data.iter().any(|m| m.is_named(&member.name)) {
            return Err(HouseholdError::Duplicate {
                entity_type: "Member",
                identifier: member.name,
            });
        }
        data.push(member);
        Ok(())
    }

    /// Replace an existing member in place
    pub fn update(&self, member: Member) -> Result<(), HouseholdError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let slot = data
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or_else(|| HouseholdError::member_not_found(member.id.to_string()))?;
        *slot = member;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, HouseholdError> {
        Ok(self.data.read().map_err(lock_err)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_insert_keeps_join_order() {
        let (_temp, repo) = create_test_repo();
        for name in ["Mathew", "Brycen", "Nathan"] {
            repo.insert(Member::new(name)).unwrap();
        }

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Mathew", "Brycen", "Nathan"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp, repo) = create_test_repo();
        repo.insert(Member::new("Michael")).unwrap();

        let err = repo.insert(Member::new("michael")).unwrap_err();
        assert!(matches!(err, HouseholdError::Duplicate { .. }));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let (temp, repo) = create_test_repo();
        repo.insert(Member::new("Mathew")).unwrap();
        repo.insert(Member::new("Nathan")).unwrap();
        repo.save().unwrap();

        let reloaded = MemberRepository::new(temp.path().join("members.json"));
        reloaded.load().unwrap();

        let names: Vec<_> = reloaded.get_all().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Mathew", "Nathan"]);
        assert!(reloaded.get_by_name("NATHAN").unwrap().is_some());
    }

    #[test]
    fn test_update_unknown_member() {
        let (_temp, repo) = create_test_repo();
        let err = repo.update(Member::new("Ghost")).unwrap_err();
        assert!(err.is_not_found());
    }
}
