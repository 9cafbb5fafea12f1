//! Chore display formatting

use tabled::Tabled;

use crate::models::Chore;

use super::render_table;

#[derive(Tabled)]
struct ChoreRow {
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Chore")]
    label: String,
    #[tabled(rename = "Assigned To")]
    assigned_to: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format chores as a checklist table, with the week in the heading if known
pub fn format_chore_list(chores: &[Chore], week: Option<u32>) -> String {
    let heading = match week {
        Some(week) => format!("Chores for week {}\n", week),
        None => String::new(),
    };

    if chores.is_empty() {
        return format!("{}No chores found.", heading);
    }

    let rows = chores
        .iter()
        .map(|c| ChoreRow {
            done: if c.done { "[x]" } else { "[ ]" },
            label: c.label.clone(),
            assigned_to: c.assigned_to.clone().unwrap_or_else(|| "-".to_string()),
            id: c.id.to_string(),
        })
        .collect();

    format!("{}{}", heading, render_table(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chore_list() {
        let mut dishes = Chore::new("Dishes");
        dishes.assign(Some("Brycen".into()));
        let mut trash = Chore::new("Trash");
        trash.done = true;

        let output = format_chore_list(&[dishes, trash], Some(7));
        assert!(output.starts_with("Chores for week 7"));
        assert!(output.contains("Brycen"));
        assert!(output.contains("[x]"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_chore_list(&[], None), "No chores found.");
    }
}
