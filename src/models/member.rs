//! Household member model
//!
//! Members are identified by their display name everywhere else in the model:
//! chores and expenses store the name, not the id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A person living in the household
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,

    /// Unique display name
    pub name: String,

    /// Handle used when settling up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venmo_username: Option<String>,

    /// When the member joined; rotation order follows this
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into().trim().to_string(),
            venmo_username: None,
            created_at: Utc::now(),
        }
    }

    /// Normalize a name for uniqueness checks
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Member name cannot be empty".into());
        }
        if self.name.len() > 64 {
            return Err(format!(
                "Member name too long ({} chars, max 64)",
                self.name.len()
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_trims_name() {
        let member = Member::new("  Nathan ");
        assert_eq!(member.name, "Nathan");
        assert!(member.venmo_username.is_none());
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_is_named_ignores_case() {
        let member = Member::new("Brycen");
        assert!(member.is_named("brycen"));
        assert!(member.is_named(" BRYCEN "));
        assert!(!member.is_named("Bryce"));
    }

    #[test]
    fn test_validation() {
        assert!(Member::new("   ").validate().is_err());
        assert!(Member::new("x".repeat(65)).validate().is_err());
    }
}
