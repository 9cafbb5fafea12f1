//! Display formatting for terminal output
//!
//! List views are rendered as tables; single records get a detail view.

pub mod chore;
pub mod expense;
pub mod member;
pub mod template;

pub use chore::format_chore_list;
pub use expense::{format_expense_details, format_expense_list};
pub use member::format_member_list;
pub use template::{format_template_details, format_template_list};

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows as a table in the shared house style
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
