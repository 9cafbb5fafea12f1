//! Audit trail entries
//!
//! An entry either describes one record being added, changed or removed, or
//! summarizes a batch run: a weekly chore rotation or a day's generated
//! recurring expenses.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{Chore, Expense};

use super::subject::{Audited, Subject};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Added,
    Changed,
    Removed,
    /// Chores were handed out for an ISO week
    Rotated { week: u32 },
    /// Recurring rules were turned into expenses for a local day
    Generated { date: NaiveDate },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Added => write!(f, "added"),
            Action::Changed => write!(f, "changed"),
            Action::Removed => write!(f, "removed"),
            Action::Rotated { week } => write!(f, "rotated chores for week {}", week),
            Action::Generated { date } => write!(f, "generated recurring expenses for {}", date),
        }
    }
}

/// One line of `audit.log`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,

    pub action: Action,

    /// The record acted on; batch entries have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,

    /// Field changes, or one line per record touched by a batch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,

    /// The record after the action (before it, for removals)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Value>,
}

impl AuditEntry {
    fn about<T: Audited>(action: Action, record: &T) -> Self {
        Self {
            at: Utc::now(),
            action,
            subject: Some(record.subject()),
            details: Vec::new(),
            snapshot: serde_json::to_value(record).ok(),
        }
    }

    pub fn added<T: Audited>(record: &T) -> Self {
        Self::about(Action::Added, record)
    }

    pub fn removed<T: Audited>(record: &T) -> Self {
        Self::about(Action::Removed, record)
    }

    /// An entry for an update, or `None` if no audited field changed
    pub fn changed<T: Audited>(before: &T, after: &T) -> Option<Self> {
        let details = after.changes_since(before);
        if details.is_empty() {
            return None;
        }
        Some(Self {
            details,
            ..Self::about(Action::Changed, after)
        })
    }

    /// Summary of a rotation: who got which chore
    pub fn rotation(week: u32, chores: &[Chore]) -> Self {
        Self {
            at: Utc::now(),
            action: Action::Rotated { week },
            subject: None,
            details: chores
                .iter()
                .map(|c| format!("{} -> {}", c.label, c.assigned_to.as_deref().unwrap_or("-")))
                .collect(),
            snapshot: Some(json!({ "chores": chores.len() })),
        }
    }

    /// Summary of a materializer run
    pub fn generation(date: NaiveDate, created: &[Expense], failed: usize) -> Self {
        let mut details: Vec<String> = created
            .iter()
            .map(|e| format!("{} {} for {}", e.description, e.amount, e.assignee_list()))
            .collect();
        if failed > 0 {
            details.push(format!("{} rule(s) failed", failed));
        }

        Self {
            at: Utc::now(),
            action: Action::Generated { date },
            subject: None,
            details,
            snapshot: Some(json!({ "created": created.len(), "failed": failed })),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.at.format("%Y-%m-%d %H:%M UTC"), self.action)?;
        if let Some(subject) = &self.subject {
            write!(f, " {}", subject)?;
        }
        for line in &self.details {
            write!(f, "\n    {}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;

    #[test]
    fn test_added_entry_names_the_record() {
        let member = Member::new("Nathan");
        let entry = AuditEntry::added(&member);

        assert_eq!(entry.action, Action::Added);
        assert!(entry.to_string().contains("added member 'Nathan'"));
        assert_eq!(entry.snapshot.unwrap()["name"], "Nathan");
    }

    #[test]
    fn test_unchanged_update_has_no_entry() {
        let chore = Chore::new("Dishes");
        assert!(AuditEntry::changed(&chore, &chore.clone()).is_none());
    }

    #[test]
    fn test_rotation_entry() {
        let mut dishes = Chore::new("Dishes");
        dishes.assign(Some("Brycen".into()));
        let trash = Chore::new("Trash");

        let entry = AuditEntry::rotation(5, &[dishes, trash]);
        let text = entry.to_string();

        assert!(text.contains("rotated chores for week 5"));
        assert!(text.contains("Dishes -> Brycen"));
        assert!(text.contains("Trash -> -"));
    }

    #[test]
    fn test_batch_entry_survives_serialization() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let entry = AuditEntry::generation(date, &[], 2);

        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("\"subject\""));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.action, Action::Generated { date });
        assert_eq!(back.details, ["2 rule(s) failed"]);
    }
}
