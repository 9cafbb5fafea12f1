//! Audit trail for household-cli
//!
//! Every change to members, chores, expenses and recurring rules is appended
//! to `audit.log`, along with a summary of each chore rotation and each run
//! of the recurring expense generator.

mod entry;
mod logger;
mod subject;

pub use entry::{Action, AuditEntry};
pub use logger::AuditLog;
pub use subject::{Audited, RecordKind, Subject};
