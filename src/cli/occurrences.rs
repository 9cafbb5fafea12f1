//! Recurring expense generation command

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use clap::Args;

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{HouseholdError, HouseholdResult};
use crate::services::RecurrenceMaterializer;
use crate::storage::Storage;

/// Arguments for `household occurrences`
#[derive(Args)]
pub struct OccurrencesArgs {
    /// Generate for this local date (YYYY-MM-DD) instead of today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Noon on `date` in the local timezone
fn local_noon(date: &str) -> HouseholdResult<DateTime<Local>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| HouseholdError::Validation(format!("Invalid date '{}': {}", date, e)))?;
    let noon = day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());

    Local
        .from_local_datetime(&noon)
        .earliest()
        .ok_or_else(|| HouseholdError::Validation(format!("No local time for {}", date)))
}

pub fn handle_occurrences_command(
    storage: &Storage,
    settings: &Settings,
    args: OccurrencesArgs,
) -> HouseholdResult<()> {
    let now = match args.date.as_deref() {
        Some(date) => local_noon(date)?,
        None => Local::now(),
    };

    let report = RecurrenceMaterializer::new(storage).run(&now)?;
    if !report.created.is_empty() || report.has_failures() {
        storage.record(AuditEntry::generation(
            report.date,
            &report.created,
            report.failures.failures.len(),
        ));
    }

    println!(
        "{}: {} rule(s) considered, {} created, {} already done",
        report.date,
        report.considered,
        report.created.len(),
        report.already_materialized.len()
    );
    if !report.created.is_empty() {
        print!(
            "{}",
            format_expense_list(
                &report.created,
                &settings.currency_symbol,
                &settings.date_format
            )
        );
    }

    if report.has_failures() {
        return Err(HouseholdError::PartialBatch(report.failures));
    }

    Ok(())
}
