//! Recurring expense rule CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_template_details, format_template_list};
use crate::error::{HouseholdError, HouseholdResult};
use crate::models::{Frequency, SchedulePatch};
use crate::services::TemplateService;
use crate::storage::Storage;

/// Recurring rule subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List recurring rules
    List,
    /// Show a rule and the occurrences it has generated
    Show {
        /// Rule ID
        template: String,
    },
    /// Change when a rule fires
    Reschedule {
        /// Rule ID
        template: String,
        /// "weekly" or "monthly"
        #[arg(short, long, value_parser = parse_frequency)]
        frequency: Option<Frequency>,
        /// Day of the month for monthly rules (1-31)
        #[arg(long)]
        day_of_month: Option<u32>,
        /// Weekday for weekly rules (e.g. "friday")
        #[arg(long)]
        day_of_week: Option<String>,
    },
    /// Delete a rule (occurrences already generated are kept)
    Delete {
        /// Rule ID
        template: String,
    },
}

fn parse_frequency(s: &str) -> Result<Frequency, String> {
    Frequency::parse(s).ok_or_else(|| format!("unknown frequency '{}', use weekly or monthly", s))
}

pub fn handle_template_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TemplateCommands,
) -> HouseholdResult<()> {
    let service = TemplateService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TemplateCommands::List => {
            print!("{}", format_template_list(&service.list()?, currency));
            println!();
        }

        TemplateCommands::Show { template } => {
            let found = service
                .find(&template)?
                .ok_or_else(|| HouseholdError::template_not_found(&template))?;
            print!("{}", format_template_details(&found, currency));

            let occurrences = service.occurrences(&template)?;
            println!();
            println!("Occurrences ({}):", occurrences.len());
            if !occurrences.is_empty() {
                print!(
                    "{}",
                    format_expense_list(&occurrences, currency, &settings.date_format)
                );
            }
        }

        TemplateCommands::Reschedule {
            template,
            frequency,
            day_of_month,
            day_of_week,
        } => {
            let patch = SchedulePatch {
                frequency,
                day_of_month,
                day_of_week,
            };
            let updated = service.reschedule(&template, &patch)?;
            println!("'{}' now repeats {}", updated.description, updated.schedule);
        }

        TemplateCommands::Delete { template } => {
            let deleted = service.delete(&template)?;
            println!("Deleted recurring expense: {}", deleted.description);
        }
    }

    Ok(())
}
