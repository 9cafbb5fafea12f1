//! Chore model
//!
//! A recurring household task. The rotation assigner rewrites `assigned_to`
//! and clears `done` every week; members toggle `done` by hand in between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ChoreId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub id: ChoreId,

    pub label: String,

    #[serde(default)]
    pub done: bool,

    /// Member name, if the chore has been handed out
    #[serde(default)]
    pub assigned_to: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Chore {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ChoreId::new(),
            label: label.into().trim().to_string(),
            done: false,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    /// Hand the chore to a member for a fresh week
    pub fn assign(&mut self, member: Option<String>) {
        self.assigned_to = member;
        self.done = false;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.label.is_empty() {
            return Err("label is required".into());
        }
        Ok(())
    }
}

impl fmt::Display for Chore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "x" } else { " " };
        match &self.assigned_to {
            Some(member) => write!(f, "[{}] {} ({})", mark, self.label, member),
            None => write!(f, "[{}] {}", mark, self.label),
        }
    }
}
