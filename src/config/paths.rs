//! Path management for household-cli
//!
//! ## Path Resolution Order
//!
//! 1. `HOUSEHOLD_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `household-cli`
//!    (`~/.config/household-cli` on Linux, `%APPDATA%\household-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HouseholdError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HOUSEHOLD_CLI_DATA_DIR";

/// Manages all paths used by household-cli
#[derive(Debug, Clone)]
pub struct HouseholdPaths {
    base_dir: PathBuf,
}

impl HouseholdPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HouseholdError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    pub fn chores_file(&self) -> PathBuf {
        self.data_dir().join("chores.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to templates.json (recurring expense rules)
    pub fn templates_file(&self) -> PathBuf {
        self.data_dir().join("templates.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), HouseholdError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HouseholdError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HouseholdError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if household-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, HouseholdError> {
    ProjectDirs::from("", "", "household-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HouseholdError::Config("Could not determine a home directory".into()))
}
