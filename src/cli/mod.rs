//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod chore;
pub mod expense;
pub mod export;
pub mod log;
pub mod member;
pub mod occurrences;
pub mod template;

pub use chore::{handle_chore_command, ChoreCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use log::{handle_log_command, LogArgs};
pub use member::{handle_member_command, MemberCommands};
pub use occurrences::{handle_occurrences_command, OccurrencesArgs};
pub use template::{handle_template_command, TemplateCommands};
