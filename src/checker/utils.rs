use serde_json::{Map, Value};
use std::path::{Component, Path};

/// Splits an id into its path segments, ignoring empty and `.` parts.
pub fn id_segments(id: &str) -> Vec<&str> {
    Path::new(id)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

/// Renders a JSON value for an issue message, leaving strings unquoted.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Integer view of a JSON number. Floats are not integers even when whole.
pub fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Message for keys of `record` outside `fields`, if there are any.
pub fn unexpected_keys(record: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    let mut extra: Vec<&str> = record
        .keys()
        .map(String::as_str)
        .filter(|key| !fields.contains(key))
        .collect();
    extra.sort_unstable();
    match extra.as_slice() {
        [] => None,
        [key] => Some(format!("Unexpected key: \"{key}\"")),
        keys => Some(format!("Unexpected keys: {keys:?}")),
    }
}

/// True when some value occurs more than once.
pub fn has_duplicates<T: Ord>(items: &[T]) -> bool {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_unstable();
    sorted.windows(2).any(|pair| pair[0] == pair[1])
}
