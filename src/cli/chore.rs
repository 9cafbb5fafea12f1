//! Chore CLI commands

use chrono::Utc;
use clap::Subcommand;

use crate::audit::AuditEntry;
use crate::display::format_chore_list;
use crate::error::HouseholdResult;
use crate::services::{week, ChoreRotationService, ChoreService};
use crate::storage::Storage;

/// Chore subcommands
#[derive(Subcommand)]
pub enum ChoreCommands {
    /// Add a chore
    Add {
        /// What needs doing
        label: String,
    },
    /// List chores with their current assignee
    List,
    /// Toggle a chore between done and not done
    Done {
        /// Chore label or ID
        chore: String,
    },
    /// Delete a chore
    Delete {
        /// Chore label or ID
        chore: String,
    },
    /// Rotate chores for this week (or a given ISO week)
    Assign {
        /// ISO week number to assign for
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=53))]
        week: Option<u32>,
    },
}

pub fn handle_chore_command(storage: &Storage, cmd: ChoreCommands) -> HouseholdResult<()> {
    let service = ChoreService::new(storage);

    match cmd {
        ChoreCommands::Add { label } => {
            let chore = service.create(&label)?;
            println!("Added chore: {}", chore.label);
            println!("  ID: {}", chore.id);
        }

        ChoreCommands::List => {
            let week = week::week_number_at(&Utc::now());
            print!("{}", format_chore_list(&service.list()?, Some(week)));
        }

        ChoreCommands::Done { chore } => {
            let updated = service.toggle(&chore)?;
            let state = if updated.done { "done" } else { "not done" };
            println!("Marked '{}' as {}", updated.label, state);
        }

        ChoreCommands::Delete { chore } => {
            let deleted = service.delete(&chore)?;
            println!("Deleted chore: {}", deleted.label);
        }

        ChoreCommands::Assign { week } => {
            let week = week.unwrap_or_else(|| week::week_number_at(&Utc::now()));
            let assigned = ChoreRotationService::new(storage).assign_week(week)?;
            storage.record(AuditEntry::rotation(week, &assigned));

            if assigned.is_empty() {
                println!("No chores to assign.");
            } else {
                print!("{}", format_chore_list(&assigned, Some(week)));
            }
        }
    }

    Ok(())
}
