//! Custom error types for household-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// The main error type for household-cli operations
#[derive(Error, Debug)]
pub enum HouseholdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Missing or invalid required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Chore rotation was requested for an empty household
    #[error("No members available to assign chores")]
    NoMembers,

    /// Some operations of a batch failed while others were committed
    #[error("{0}")]
    PartialBatch(BatchFailure),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HouseholdError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for chores
    pub fn chore_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Chore",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring templates
    pub fn template_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring rule",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a partial batch failure
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialBatch(_))
    }
}

/// One failed item of a batch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// What the operation was for (an assignee, a template id, ...)
    pub target: String,
    /// Rendered error message
    pub message: String,
}

/// Aggregate of the failed items of a batch; successful items stay applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchFailure {
    pub attempted: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchFailure {
    /// Create an empty failure set for a batch of `attempted` operations
    pub fn new(attempted: usize) -> Self {
        Self {
            attempted,
            failures: Vec::new(),
        }
    }

    /// Record a failed item
    pub fn push(&mut self, target: impl Into<String>, err: &HouseholdError) {
        self.failures.push(ItemFailure {
            target: target.into(),
            message: err.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of items that went through
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failures.len())
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} operations failed: ",
            self.failures.len(),
            self.attempted
        )?;
        let parts: Vec<String> = self
            .failures
            .iter()
            .map(|item| format!("{} ({})", item.target, item.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for HouseholdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HouseholdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for HouseholdError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for household-cli operations
pub type HouseholdResult<T> = Result<T, HouseholdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HouseholdError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = HouseholdError::chore_not_found("Dishes");
        assert_eq!(err.to_string(), "Chore not found: Dishes");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_no_members_message() {
        assert_eq!(
            HouseholdError::NoMembers.to_string(),
            "No members available to assign chores"
        );
    }

    #[test]
    fn test_batch_failure_display() {
        let mut batch = BatchFailure::new(3);
        batch.push("Brycen", &HouseholdError::Storage("disk full".into()));

        assert_eq!(batch.succeeded(), 2);
        let err = HouseholdError::PartialBatch(batch);
        assert!(err.is_partial());
        assert_eq!(
            err.to_string(),
            "1 of 3 operations failed: Brycen (Storage error: disk full)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HouseholdError = io_err.into();
        assert!(matches!(err, HouseholdError::Io(_)));
    }
}
