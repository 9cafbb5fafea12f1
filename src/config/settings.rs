//! User settings for household-cli
//!
//! Manages household preferences: currency display, expense categories,
//! cache lifetime and diagnostic log level.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::paths::HouseholdPaths;
use crate::error::HouseholdError;

/// Household settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category used when an expense is added without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Categories offered for new expenses
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// How long cached lookups stay fresh, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Default diagnostic log filter (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

const MAX_TTL_SECS: u64 = (i64::MAX / 1000) as u64;

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category() -> String {
    "Rent".to_string()
}

fn default_categories() -> Vec<String> {
    ["Rent", "Utilities", "Groceries", "Internet", "Household", "Other"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_cache_ttl_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            categories: default_categories(),
            cache_ttl_secs: default_cache_ttl_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Cache lifetime as a duration
    pub fn cache_ttl(&self) -> Duration {
        // chrono rejects spans above i64::MAX milliseconds
        let secs = self.cache_ttl_secs.min(MAX_TTL_SECS) as i64;
        Duration::seconds(secs)
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &HouseholdPaths) -> Result<Self, HouseholdError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                HouseholdError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                HouseholdError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HouseholdPaths) -> Result<(), HouseholdError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            HouseholdError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            HouseholdError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_category, "Rent");
        assert_eq!(settings.cache_ttl(), Duration::seconds(120));
        assert!(settings.categories.contains(&"Groceries".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.cache_ttl_secs = 30;
        settings.default_category = "Groceries".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.cache_ttl_secs, 30);
        assert_eq!(loaded.default_category, "Groceries");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.schema_version, 1);
    }
}
