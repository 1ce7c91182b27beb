// crates/form-gate-core/src/core/path.rs
// ============================================================================
// Module: Form Gate Path Utility
// Description: Dot-path lookup and update over nested JSON mappings.
// Purpose: Resolve condition targets and apply caller-owned value updates.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Lookups never fail: a missing intermediate key, or a segment that lands on
//! a scalar, resolves to `None`. Array elements are addressable by numeric
//! segments. Updates create intermediate objects and refuse to overwrite a
//! scalar with an object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::schema::PATH_SEPARATOR;

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Resolves a dot-path against a JSON value.
#[must_use]
pub fn get_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split(PATH_SEPARATOR) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Returns true when a value counts as provided (not null and not `""`).
#[must_use]
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

// ============================================================================
// SECTION: Update
// ============================================================================

/// Errors raised while updating a value by path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("path must be non-empty")]
    Empty,
    /// An intermediate segment resolved to a non-object value.
    #[error("path segment {0} is not an object")]
    NotAnObject(String),
}

/// Sets a value at a dot-path, creating intermediate objects.
///
/// # Errors
///
/// Returns [`PathError`] when the path is empty or crosses a non-object value.
pub fn set_path(data: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err(PathError::Empty);
    };
    if data.is_null() {
        *data = Value::Object(Map::new());
    }
    let mut current = data;
    let mut walked = String::new();
    for segment in parents {
        if !walked.is_empty() {
            walked.push(PATH_SEPARATOR);
        }
        walked.push_str(segment);
        let Value::Object(map) = current else {
            return Err(PathError::NotAnObject(walked));
        };
        let entry = map.entry((*segment).to_string()).or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }
    let Value::Object(map) = current else {
        return Err(PathError::NotAnObject(walked));
    };
    map.insert((*last).to_string(), value);
    Ok(())
}
