//! Assignee sets
//!
//! Assignees are kept as an ordered set of member names. Older data files
//! stored them as a JSON-encoded string inside the record, and hand-edited
//! files may hold anything at all, so decoding never fails: anything that is
//! not a list of names becomes an empty set.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Member names an expense is charged to
pub type Assignees = BTreeSet<String>;

/// Build an assignee set from loose names, dropping blanks
pub fn from_names<I, S>(names: I) -> Assignees
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Decode an assignee set from any JSON value
pub fn from_value(value: &Value) -> Assignees {
    match value {
        Value::Array(items) => from_names(items.iter().filter_map(Value::as_str)),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(inner @ Value::Array(_)) => from_value(&inner),
            _ => Assignees::new(),
        },
        _ => Assignees::new(),
    }
}

/// Serde adapter: `#[serde(deserialize_with = "assignees::deserialize_lenient")]`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Assignees, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(from_value).unwrap_or_default())
}
