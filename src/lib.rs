//! household-cli - Chores and shared expenses for a small household
//!
//! This library provides the core of the `household` command: a weekly chore
//! rotation, even splitting of shared expenses between members, and recurring
//! expense rules that turn into real expenses on the days they fall due.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, chores, expenses, recurring rules)
//! - `storage`: JSON file storage layer and the [`storage::HouseholdStore`] contract
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `cache`: Time-bounded caching of storage lookups
//! - `reports`: Balances and spending summaries
//! - `export`: CSV and JSON export
//!
//! # Example
//!
//! ```rust,ignore
//! use household::config::{paths::HouseholdPaths, settings::Settings};
//! use household::services::ChoreRotationService;
//! use household::storage::Storage;
//!
//! let paths = HouseholdPaths::new()?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let chores = ChoreRotationService::new(&storage).assign_week(5)?;
//! ```

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{HouseholdError, HouseholdResult};
