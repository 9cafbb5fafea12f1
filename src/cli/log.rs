//! Audit log command

use clap::Args;

use crate::error::HouseholdResult;
use crate::storage::Storage;

/// Arguments for `household log`
#[derive(Args)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

pub fn handle_log_command(storage: &Storage, args: LogArgs) -> HouseholdResult<()> {
    let entries = storage.audit().tail(args.limit)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }

    Ok(())
}
