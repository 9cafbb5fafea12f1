//! ISO-8601 week numbers
//!
//! The rotation keys off the week number, so two people running the command on
//! the same day must agree on it regardless of their clock's offset. Instants
//! are therefore reduced to their UTC calendar date before counting.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// ISO week number (1-53) of a calendar date
///
/// Uses the nearest-Thursday rule: a week belongs to the year that contains
/// its Thursday, and week 1 is the week holding that year's first Thursday.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use household::services::week::iso_week_number;
///
/// let date = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
/// assert_eq!(iso_week_number(date), 53);
/// ```
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let shift = 3 - i64::from(date.weekday().num_days_from_monday());
    match date.checked_add_signed(Duration::days(shift)) {
        // ordinal() is 1-based, so this is ceil((days_since_jan1 + 1) / 7)
        Some(thursday) => thursday.ordinal().div_ceil(7),
        None => date.iso_week().week(),
    }
}

/// ISO week number of an instant, taken on its UTC calendar date
pub fn week_number_at<Tz: TimeZone>(at: &DateTime<Tz>) -> u32 {
    iso_week_number(at.with_timezone(&Utc).date_naive())
}
