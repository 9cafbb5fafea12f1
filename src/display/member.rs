//! Member display formatting

use tabled::Tabled;

use crate::models::Member;

use super::render_table;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Venmo")]
    venmo: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format members in rotation order
pub fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members yet. Add one with `household member add <name>`.".to_string();
    }

    let rows = members
        .iter()
        .enumerate()
        .map(|(i, m)| MemberRow {
            position: i + 1,
            name: m.name.clone(),
            venmo: m
                .venmo_username
                .as_ref()
                .map(|h| format!("@{}", h))
                .unwrap_or_else(|| "-".to_string()),
            id: m.id.to_string(),
        })
        .collect();

    render_table(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_list() {
        let mut nathan = Member::new("Nathan");
        nathan.venmo_username = Some("nathan-v".into());
        let output = format_member_list(&[Member::new("Mathew"), nathan]);

        assert!(output.contains("Mathew"));
        assert!(output.contains("@nathan-v"));
        assert!(output.contains("Venmo"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_member_list(&[]).starts_with("No members yet"));
    }
}
