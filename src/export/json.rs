//! JSON Export functionality
//!
//! Exports the whole household to a single versioned JSON document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HouseholdResult;
use crate::models::{Chore, Expense, ExpenseTemplate, Member};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full household export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of household-cli that wrote the export
    pub app_version: String,
    pub members: Vec<Member>,
    pub chores: Vec<Chore>,
    pub expenses: Vec<Expense>,
    pub templates: Vec<ExpenseTemplate>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub chore_count: usize,
    pub expense_count: usize,
    pub template_count: usize,
    pub unpaid_count: usize,
    pub earliest_expense: Option<DateTime<Utc>>,
    pub latest_expense: Option<DateTime<Utc>>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> HouseholdResult<Self> {
        let members = storage.members.get_all()?;
        let chores = storage.chores.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let templates = storage.templates.get_all()?;

        let metadata = ExportMetadata {
            member_count: members.len(),
            chore_count: chores.len(),
            expense_count: expenses.len(),
            template_count: templates.len(),
            unpaid_count: expenses.iter().filter(|e| !e.paid).count(),
            earliest_expense: expenses.iter().map(|e| e.created_at).min(),
            latest_expense: expenses.iter().map(|e| e.created_at).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            members,
            chores,
            expenses,
            templates,
            metadata,
        })
    }
}

/// Write the full export as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, mut writer: W) -> HouseholdResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HouseholdPaths;
    use crate::models::{Money, NewExpense};
    use crate::storage::HouseholdStore;
    use tempfile::TempDir;

    #[test]
    fn test_full_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.members.insert(Member::new("Michael")).unwrap();
        storage.chores.upsert(Chore::new("Dishes")).unwrap();
        storage
            .create_expense(NewExpense::new(
                "Paper towels",
                Money::from_cents(899),
                "Household",
                "Michael",
            ))
            .unwrap();

        let mut out = Vec::new();
        export_full_json(&storage, &mut out).unwrap();

        let parsed: FullExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.metadata.member_count, 1);
        assert_eq!(parsed.metadata.chore_count, 1);
        assert_eq!(parsed.metadata.unpaid_count, 1);
        assert_eq!(parsed.expenses[0].amount.cents(), 899);
    }
}
