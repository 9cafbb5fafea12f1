//! Export CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{HouseholdError, HouseholdResult};
use crate::export::{export_expenses_csv, export_full_json, export_templates_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export all expenses to CSV
    Expenses {
        /// Output file path
        output: PathBuf,
    },
    /// Export recurring rules to CSV
    Rules {
        /// Output file path
        output: PathBuf,
    },
    /// Export the whole household to JSON
    All {
        /// Output file path
        output: PathBuf,
    },
}

fn create_output(path: &PathBuf) -> HouseholdResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        HouseholdError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> HouseholdResult<()> {
    match cmd {
        ExportCommands::Expenses { output } => {
            export_expenses_csv(storage, create_output(&output)?)?;
            println!("Exported expenses to: {}", output.display());
        }
        ExportCommands::Rules { output } => {
            export_templates_csv(storage, create_output(&output)?)?;
            println!("Exported recurring rules to: {}", output.display());
        }
        ExportCommands::All { output } => {
            export_full_json(storage, create_output(&output)?)?;
            println!("Exported household to: {}", output.display());
        }
    }

    Ok(())
}
