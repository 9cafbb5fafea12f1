//! Export module for household-cli
//!
//! - CSV: expenses and recurring rules (spreadsheet-compatible)
//! - JSON: the whole household in one versioned document

pub mod csv;
pub mod json;

pub use csv::{export_expenses_csv, export_templates_csv, write_expenses};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
