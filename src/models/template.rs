//! Recurring expense rules
//!
//! An `ExpenseTemplate` is a standing rule, not a transaction: on each day its
//! schedule matches, the recurrence materializer turns it into one `Expense`.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::assignees::{self, Assignees};
use super::ids::TemplateId;
use super::money::Money;

/// How often a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Some(Self::Weekly),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Full lowercase English name of a weekday (`"monday"`)
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES
        .iter()
        .find(|(_, w)| *w == day)
        .map(|(name, _)| *name)
        .unwrap_or("monday")
}

/// Parse a full English weekday name, ignoring case
pub fn parse_weekday_name(s: &str) -> Option<Weekday> {
    let s = s.trim();
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, w)| *w)
}

/// When a rule fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub frequency: Frequency,

    /// 1-31, set iff monthly
    #[serde(default)]
    pub day_of_month: Option<u32>,

    /// Lowercase weekday name, set iff weekly
    #[serde(default)]
    pub day_of_week: Option<String>,
}

impl Schedule {
    pub fn weekly(day_of_week: impl Into<String>) -> Self {
        Self {
            frequency: Frequency::Weekly,
            day_of_month: None,
            day_of_week: Some(day_of_week.into().trim().to_lowercase()),
        }
    }

    pub fn monthly(day_of_month: u32) -> Self {
        Self {
            frequency: Frequency::Monthly,
            day_of_month: Some(day_of_month),
            day_of_week: None,
        }
    }

    /// Drop the day field the frequency doesn't use and lowercase the weekday
    pub fn normalize(&mut self) {
        match self.frequency {
            Frequency::Weekly => {
                self.day_of_month = None;
                self.day_of_week = self.day_of_week.as_ref().map(|d| d.trim().to_lowercase());
            }
            Frequency::Monthly => self.day_of_week = None,
        }
    }

    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        match self.frequency {
            Frequency::Monthly => match self.day_of_month {
                None => Err(TemplateValidationError::MissingDayOfMonth),
                Some(day) if !(1..=31).contains(&day) => {
                    Err(TemplateValidationError::DayOfMonthOutOfRange(day))
                }
                Some(_) => Ok(()),
            },
            Frequency::Weekly => match &self.day_of_week {
                None => Err(TemplateValidationError::MissingDayOfWeek),
                Some(name) if parse_weekday_name(name).is_none() => {
                    Err(TemplateValidationError::UnknownDayOfWeek(name.clone()))
                }
                Some(_) => Ok(()),
            },
        }
    }

    /// Check whether the rule fires on `date`
    ///
    /// A monthly rule for a day the month doesn't have (31st in April) does
    /// not fire that month.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Monthly => self.day_of_month == Some(date.day()),
            Frequency::Weekly => self
                .day_of_week
                .as_deref()
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(weekday_name(date.weekday()))),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.frequency, self.day_of_month, self.day_of_week.as_deref()) {
            (Frequency::Monthly, Some(day), _) => write!(f, "monthly on day {}", day),
            (Frequency::Weekly, _, Some(name)) => write!(f, "weekly on {}", name),
            (frequency, _, _) => write!(f, "{} (unscheduled)", frequency),
        }
    }
}

/// Partial update of a rule's schedule
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub frequency: Option<Frequency>,
    pub day_of_month: Option<u32>,
    pub day_of_week: Option<String>,
}

impl SchedulePatch {
    pub fn is_empty(&self) -> bool {
        self.frequency.is_none() && self.day_of_month.is_none() && self.day_of_week.is_none()
    }

    /// Apply the patch, returning the normalized schedule
    pub fn apply(&self, current: &Schedule) -> Result<Schedule, TemplateValidationError> {
        let mut next = current.clone();
        if let Some(frequency) = self.frequency {
            next.frequency = frequency;
        }
        if let Some(day) = self.day_of_month {
            next.day_of_month = Some(day);
        }
        if let Some(name) = &self.day_of_week {
            next.day_of_week = Some(name.clone());
        }
        next.normalize();
        next.validate()?;
        Ok(next)
    }
}

/// A recurring expense rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseTemplate {
    pub id: TemplateId,

    pub description: String,

    pub amount: Money,

    pub category: String,

    #[serde(default, deserialize_with = "assignees::deserialize_lenient")]
    pub assignees: Assignees,

    #[serde(flatten)]
    pub schedule: Schedule,

    pub created_by: String,

    pub created_at: DateTime<Utc>,
}

/// Fields for a new recurring rule, as handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpenseTemplate {
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub assignees: Assignees,
    pub schedule: Schedule,
    pub created_by: String,
}

impl ExpenseTemplate {
    pub fn from_new(new: NewExpenseTemplate) -> Self {
        let mut schedule = new.schedule;
        schedule.normalize();
        Self {
            id: TemplateId::new(),
            description: new.description,
            amount: new.amount,
            category: new.category,
            assignees: new.assignees,
            schedule,
            created_by: new.created_by,
            created_at: Utc::now(),
        }
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.schedule.is_due_on(date)
    }

    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        if self.description.trim().is_empty() {
            return Err(TemplateValidationError::MissingDescription);
        }
        self.schedule.validate()
    }
}

/// Validation errors for recurring rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValidationError {
    MissingDescription,
    MissingDayOfMonth,
    DayOfMonthOutOfRange(u32),
    MissingDayOfWeek,
    UnknownDayOfWeek(String),
}

impl fmt::Display for TemplateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescription => write!(f, "Recurring rule needs a description"),
            Self::MissingDayOfMonth => {
                write!(f, "Please select a day of month for recurring expenses")
            }
            Self::DayOfMonthOutOfRange(day) => {
                write!(f, "Day of month must be between 1 and 31 (got {})", day)
            }
            Self::MissingDayOfWeek => {
                write!(f, "Please select a day of week for recurring expenses")
            }
            Self::UnknownDayOfWeek(name) => write!(f, "Unknown day of week: '{}'", name),
        }
    }
}

impl std::error::Error for TemplateValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "monday");
        assert_eq!(weekday_name(Weekday::Sun), "sunday");
        assert_eq!(parse_weekday_name("Friday"), Some(Weekday::Fri));
        assert_eq!(parse_weekday_name(" SATURDAY "), Some(Weekday::Sat));
        assert_eq!(parse_weekday_name("fri"), None);
    }

    #[test]
    fn test_weekly_due_case_insensitive() {
        let schedule = Schedule {
            frequency: Frequency::Weekly,
            day_of_month: None,
            day_of_week: Some("Monday".into()),
        };
        // 2024-01-01 is a Monday
        assert!(schedule.is_due_on(date(2024, 1, 1)));
        assert!(!schedule.is_due_on(date(2024, 1, 2)));
        assert!(schedule.is_due_on(date(2024, 1, 8)));
    }

    #[test]
    fn test_monthly_due() {
        let schedule = Schedule::monthly(15);
        assert!(schedule.is_due_on(date(2024, 2, 15)));
        assert!(!schedule.is_due_on(date(2024, 2, 16)));
    }

    #[test]
    fn test_monthly_31_skips_short_months() {
        let schedule = Schedule::monthly(31);
        for day in 1..=30 {
            assert!(!schedule.is_due_on(date(2024, 4, day)));
        }
        assert!(schedule.is_due_on(date(2024, 5, 31)));
    }

    #[test]
    fn test_validation() {
        assert!(Schedule::monthly(1).validate().is_ok());
        assert_eq!(
            Schedule::monthly(0).validate(),
            Err(TemplateValidationError::DayOfMonthOutOfRange(0))
        );
        assert_eq!(
            Schedule::monthly(32).validate(),
            Err(TemplateValidationError::DayOfMonthOutOfRange(32))
        );
        assert!(Schedule::weekly("sunday").validate().is_ok());
        assert!(matches!(
            Schedule::weekly("someday").validate(),
            Err(TemplateValidationError::UnknownDayOfWeek(_))
        ));
        let missing = Schedule {
            frequency: Frequency::Weekly,
            day_of_month: Some(3),
            day_of_week: None,
        };
        assert_eq!(missing.validate(), Err(TemplateValidationError::MissingDayOfWeek));
    }

    #[test]
    fn test_patch_switches_frequency() {
        let current = Schedule::weekly("friday");
        let patch = SchedulePatch {
            frequency: Some(Frequency::Monthly),
            day_of_month: Some(5),
            day_of_week: None,
        };

        let next = patch.apply(&current).unwrap();
        assert_eq!(next, Schedule::monthly(5));
    }

    #[test]
    fn test_patch_requires_matching_day() {
        let current = Schedule::weekly("friday");
        let patch = SchedulePatch {
            frequency: Some(Frequency::Monthly),
            ..Default::default()
        };
        assert_eq!(
            patch.apply(&current),
            Err(TemplateValidationError::MissingDayOfMonth)
        );
    }

    #[test]
    fn test_flattened_serialization() {
        let template = ExpenseTemplate::from_new(NewExpenseTemplate {
            description: "Internet".into(),
            amount: Money::from_cents(6000),
            category: "Utilities".into(),
            assignees: Assignees::new(),
            schedule: Schedule::weekly("Tuesday"),
            created_by: "Mathew".into(),
        });

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["frequency"], "weekly");
        assert_eq!(value["day_of_week"], "tuesday");
        assert!(value["day_of_month"].is_null());

        let back: ExpenseTemplate = serde_json::from_value(value).unwrap();
        assert_eq!(back.schedule, template.schedule);
    }
}
