//! Configuration module for household-cli
//!
//! - Path resolution (env override or platform config dir)
//! - Household settings persistence

pub mod paths;
pub mod settings;

pub use paths::HouseholdPaths;
pub use settings::Settings;
