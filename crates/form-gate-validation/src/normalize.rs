// crates/form-gate-validation/src/normalize.rs
// ============================================================================
// Module: Schema Normalization
// Description: Derives structural JSON Schemas from form schemas.
// Purpose: Hand the engine a schema free of presentation annotations.
// Dependencies: form-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Normalization removes every `ui:`-prefixed key at any depth. Schemas that
//! declare `sections` are additionally flattened into one object schema whose
//! properties are keyed `section.field`; per-field `required: true` flags are
//! collected into the object's `required` list. Schemas without `sections`
//! are only stripped, so normalizing an already-structural schema is a no-op.
//! Inputs are never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use form_gate_core::FieldSchema;
use form_gate_core::FormSchema;
use form_gate_core::UI_PREFIX;
use form_gate_core::field_path;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Normalization errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A typed schema could not be rendered to JSON.
    #[error("schema serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Returns a copy of `value` without `ui:`-prefixed object keys.
#[must_use]
pub fn strip_ui_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !key.starts_with(UI_PREFIX))
                .map(|(key, value)| (key.clone(), strip_ui_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_ui_keys).collect()),
        other => other.clone(),
    }
}

/// Normalizes a raw schema document.
#[must_use]
pub fn normalize(schema: &Value) -> Value {
    match schema.get("sections").and_then(Value::as_array) {
        Some(sections) => flatten_sections(schema, sections),
        None => strip_ui_keys(schema),
    }
}

/// Normalizes a typed form schema.
///
/// # Errors
///
/// Returns [`NormalizeError`] when the schema cannot be rendered to JSON.
pub fn normalize_form(schema: &FormSchema) -> Result<Value, NormalizeError> {
    let raw = serde_json::to_value(schema).map_err(|err| NormalizeError::Serialize(err.to_string()))?;
    Ok(normalize(&raw))
}

/// Returns the structural leaf schema of a single field.
///
/// # Errors
///
/// Returns [`NormalizeError`] when the field cannot be rendered to JSON.
pub fn field_leaf_schema(field: &FieldSchema) -> Result<Value, NormalizeError> {
    let raw = serde_json::to_value(field).map_err(|err| NormalizeError::Serialize(err.to_string()))?;
    Ok(leaf_schema(&raw))
}

/// Returns an object schema holding one field under `key`.
///
/// The key is listed as required when the field is required.
///
/// # Errors
///
/// Returns [`NormalizeError`] when the field cannot be rendered to JSON.
pub fn single_field_schema(key: &str, field: &FieldSchema) -> Result<Value, NormalizeError> {
    let mut properties = Map::new();
    properties.insert(key.to_string(), field_leaf_schema(field)?);
    let mut wrapper = Map::new();
    wrapper.insert("type".to_string(), Value::String("object".to_string()));
    wrapper.insert("properties".to_string(), Value::Object(properties));
    if field.required {
        wrapper.insert("required".to_string(), Value::Array(vec![Value::String(key.to_string())]));
    }
    Ok(Value::Object(wrapper))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens sectioned schemas into a single object schema.
fn flatten_sections(schema: &Value, sections: &[Value]) -> Value {
    let mut root = Map::new();
    if let Value::Object(map) = schema {
        for (key, value) in map {
            if key != "sections" && !key.starts_with(UI_PREFIX) {
                root.insert(key.clone(), strip_ui_keys(value));
            }
        }
    }

    let mut properties = Map::new();
    let mut required = Vec::new();
    for section in sections {
        let Some(section_id) = section.get("id").and_then(Value::as_str) else {
            continue;
        };
        let Some(fields) = section.get("properties").and_then(Value::as_object) else {
            continue;
        };
        for (key, field) in fields {
            let path = field_path(section_id, key);
            if field.get("required").and_then(Value::as_bool) == Some(true) {
                required.push(Value::String(path.clone()));
            }
            properties.insert(path, leaf_schema(field));
        }
    }

    root.insert("type".to_string(), Value::String("object".to_string()));
    root.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(root)
}

/// Strips a field and drops its boolean `required` flag.
fn leaf_schema(field: &Value) -> Value {
    let mut leaf = strip_ui_keys(field);
    if let Value::Object(map) = &mut leaf
        && map.get("required").is_some_and(Value::is_boolean)
    {
        map.remove("required");
    }
    leaf
}

// ============================================================================
// SECTION: Tests
// ============================================================================
