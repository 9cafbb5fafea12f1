//! The `audit.log` file: one JSON entry per line, append only

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{HouseholdError, HouseholdResult};

use super::entry::AuditEntry;

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &AuditEntry) -> HouseholdResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| HouseholdError::Io(format!("Cannot open audit log: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, entry)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Every readable entry, oldest first
    ///
    /// Lines that don't parse are skipped with a warning so one damaged line
    /// doesn't hide the rest of the history.
    pub fn entries(&self) -> HouseholdResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HouseholdError::Io(format!("Cannot read audit log: {}", e))),
        };

        Ok(contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "Skipping unreadable audit entry");
                    None
                }
            })
            .collect())
    }

    /// The last `count` entries, oldest first
    pub fn tail(&self, count: usize) -> HouseholdResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Action;
    use crate::models::{Chore, Member};
    use tempfile::TempDir;

    fn create_test_log() -> (AuditLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        (log, temp_dir)
    }

    #[test]
    fn test_append_and_read_back() {
        let (log, _temp) = create_test_log();
        log.append(&AuditEntry::added(&Member::new("Nathan"))).unwrap();
        log.append(&AuditEntry::rotation(3, &[Chore::new("Dishes")]))
            .unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, Action::Added);
        assert_eq!(entries[1].action, Action::Rotated { week: 3 });
    }

    #[test]
    fn test_tail() {
        let (log, _temp) = create_test_log();
        for label in ["a", "b", "c", "d"] {
            log.append(&AuditEntry::added(&Chore::new(label))).unwrap();
        }

        let labels: Vec<String> = log
            .tail(2)
            .unwrap()
            .into_iter()
            .filter_map(|e| e.subject.map(|s| s.label))
            .collect();
        assert_eq!(labels, ["c", "d"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (log, _temp) = create_test_log();
        assert!(log.entries().unwrap().is_empty());
        assert!(log.tail(5).unwrap().is_empty());
    }

    #[test]
    fn test_damaged_line_is_skipped() {
        let (log, _temp) = create_test_log();
        log.append(&AuditEntry::added(&Chore::new("Dishes"))).unwrap();
        let mut contents = fs::read_to_string(log.path()).unwrap();
        contents.push_str("{not json}\n");
        fs::write(log.path(), contents).unwrap();
        log.append(&AuditEntry::added(&Chore::new("Trash"))).unwrap();

        assert_eq!(log.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_append_fails_when_path_is_a_directory() {
        let (log, _temp) = create_test_log();
        fs::create_dir(log.path()).unwrap();
        assert!(log.append(&AuditEntry::added(&Chore::new("Dishes"))).is_err());
    }
}
