//! Records that can appear in the audit trail

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Chore, Expense, ExpenseTemplate, Member};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Member,
    Chore,
    Expense,
    RecurringRule,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Member => write!(f, "member"),
            RecordKind::Chore => write!(f, "chore"),
            RecordKind::Expense => write!(f, "expense"),
            RecordKind::RecurringRule => write!(f, "rule"),
        }
    }
}

/// Which record an entry is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub kind: RecordKind,
    pub id: String,
    /// Name, label or description at the time of the entry
    pub label: String,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.kind, self.label, self.id)
    }
}

/// A record the audit trail knows how to describe
pub trait Audited: Serialize {
    fn subject(&self) -> Subject;

    /// Human-readable field changes from `before` to `self`
    fn changes_since(&self, _before: &Self) -> Vec<String> {
        Vec::new()
    }
}

fn change(field: &str, before: impl fmt::Display, after: impl fmt::Display) -> String {
    format!("{}: {} -> {}", field, before, after)
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl Audited for Member {
    fn subject(&self) -> Subject {
        Subject {
            kind: RecordKind::Member,
            id: self.id.to_string(),
            label: self.name.clone(),
        }
    }

    fn changes_since(&self, before: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if before.venmo_username != self.venmo_username {
            changes.push(change(
                "venmo",
                or_dash(&before.venmo_username),
                or_dash(&self.venmo_username),
            ));
        }
        changes
    }
}

impl Audited for Chore {
    fn subject(&self) -> Subject {
        Subject {
            kind: RecordKind::Chore,
            id: self.id.to_string(),
            label: self.label.clone(),
        }
    }

    fn changes_since(&self, before: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if before.assigned_to != self.assigned_to {
            changes.push(change(
                "assigned_to",
                or_dash(&before.assigned_to),
                or_dash(&self.assigned_to),
            ));
        }
        if before.done != self.done {
            changes.push(change("done", before.done, self.done));
        }
        changes
    }
}

impl Audited for Expense {
    fn subject(&self) -> Subject {
        Subject {
            kind: RecordKind::Expense,
            id: self.id.to_string(),
            label: self.description.clone(),
        }
    }

    fn changes_since(&self, before: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if before.paid != self.paid {
            changes.push(change("paid", before.paid, self.paid));
        }
        changes
    }
}

impl Audited for ExpenseTemplate {
    fn subject(&self) -> Subject {
        Subject {
            kind: RecordKind::RecurringRule,
            id: self.id.to_string(),
            label: self.description.clone(),
        }
    }

    fn changes_since(&self, before: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if before.schedule != self.schedule {
            changes.push(change("schedule", &before.schedule, &self.schedule));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpenseTemplate, Schedule};

    #[test]
    fn test_chore_changes() {
        let mut before = Chore::new("Dishes");
        before.done = true;
        let mut after = before.clone();
        after.assign(Some("Nathan".into()));

        assert_eq!(
            after.changes_since(&before),
            ["assigned_to: - -> Nathan", "done: true -> false"]
        );
    }

    #[test]
    fn test_member_handle_change() {
        let before = Member::new("Mathew");
        let mut after = before.clone();
        after.venmo_username = Some("mathew-p".into());

        assert_eq!(after.changes_since(&before), ["venmo: - -> mathew-p"]);
        assert_eq!(after.subject().to_string(), format!("member 'Mathew' ({})", after.id));
    }

    #[test]
    fn test_reschedule_change() {
        let before = ExpenseTemplate::from_new(NewExpenseTemplate {
            description: "Rent".into(),
            amount: Money::from_cents(120000),
            category: "Rent".into(),
            assignees: Default::default(),
            schedule: Schedule::monthly(1),
            created_by: "Nathan".into(),
        });
        let mut after = before.clone();
        after.schedule = Schedule::weekly("friday");

        assert_eq!(
            after.changes_since(&before),
            ["schedule: monthly on day 1 -> weekly on friday"]
        );
    }
}
