//! Recursive flattening of LLM-returned field values into flat strings.
//!
//! The extraction prompt asks for plain strings, but models routinely return
//! arrays, arrays of arrays, or keyed sub-objects for fields like `skills`.
//! Everything collapses to one comma-joined string before it reaches callers.

use serde_json::Value;

/// Flattens an arbitrarily nested JSON value into a single flat string.
///
/// Strings pass through, numbers and booleans stringify, null is empty.
/// Arrays flatten recursively, dropping empty leaves and joining the rest
/// with `", "` in source order. Objects flatten as the list of their values
/// (models sometimes return `{"languages": [...], "tools": [...]}` where a
/// plain list was asked for).
pub fn flatten_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => join_flattened(items.iter()),
        Value::Object(map) => join_flattened(map.values()),
    }
}

fn join_flattened<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(flatten_value)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
