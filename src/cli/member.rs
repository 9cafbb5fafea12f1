//! Member CLI commands

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::{HouseholdError, HouseholdResult};
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to the household (joins the end of the chore rotation)
    Add {
        /// Display name, unique within the household
        name: String,
        /// Venmo handle for settling up
        #[arg(long)]
        venmo: Option<String>,
    },
    /// List members in rotation order
    List,
    /// Show a member's details
    Show {
        /// Member name or ID
        member: String,
    },
    /// Set or clear a member's Venmo handle
    Venmo {
        /// Member name or ID
        member: String,
        /// New handle; omit to clear
        handle: Option<String>,
    },
}

pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> HouseholdResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, venmo } => {
            let member = service.add(&name, venmo.as_deref())?;
            let position = service.list()?.len();
            println!("Added member: {} (#{} in rotation)", member.name, position);
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            print!("{}", format_member_list(&service.list()?));
        }

        MemberCommands::Show { member } => {
            let found = service
                .find(&member)?
                .ok_or_else(|| HouseholdError::member_not_found(&member))?;

            println!("Member: {}", found.name);
            println!("  ID:     {}", found.id);
            println!(
                "  Venmo:  {}",
                found
                    .venmo_username
                    .as_ref()
                    .map(|h| format!("@{}", h))
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("  Joined: {}", found.created_at.format("%Y-%m-%d"));
        }

        MemberCommands::Venmo { member, handle } => {
            let updated = service.set_venmo(&member, handle.as_deref())?;
            match &updated.venmo_username {
                Some(h) => println!("Venmo handle for {} set to @{}", updated.name, h),
                None => println!("Cleared Venmo handle for {}", updated.name),
            }
        }
    }

    Ok(())
}
