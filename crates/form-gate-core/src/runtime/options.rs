// crates/form-gate-core/src/runtime/options.rs
// ============================================================================
// Module: Form Gate Enum Resolution
// Description: Dynamic and static option lists for choice fields.
// Purpose: Resolve the valid option set of a field from the current data.
// Dependencies: crate::{core, runtime::widget}, serde, serde_json
// ============================================================================

//! ## Overview
//! Resolution order: a dynamic mapping hit, then the static `enum`, then the
//! synthetic Yes/No pair for boolean choice widgets, then the empty set. Each
//! tier is consulted only when the previous one is absent or unmatched.
//! Labels default to the stringified value when names are missing or short.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::EnumOptions;
use crate::core::FieldSchema;
use crate::core::FieldType;
use crate::core::path::get_path;
use crate::runtime::widget::classify_widget;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tier that produced an option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSource {
    /// Dynamic mapping keyed by another field's value.
    Dynamic,
    /// Static `enum` declared on the field.
    Static,
    /// Synthetic Yes/No pair for boolean choice widgets.
    BooleanDefault,
    /// No options apply.
    None,
}

/// Resolved option values with display labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSet {
    /// Option values.
    pub options: Vec<Value>,
    /// Display labels aligned with `options`.
    pub labels: Vec<String>,
    /// Tier that produced the set.
    pub source: OptionSource,
}

impl OptionSet {
    /// Returns the empty option set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            options: Vec::new(),
            labels: Vec::new(),
            source: OptionSource::None,
        }
    }

    /// Returns true when no options are available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Builds a set from values and optional names.
    fn from_values(values: &[Value], names: Option<&[String]>, source: OptionSource) -> Self {
        let labels = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                names.and_then(|names| names.get(index)).cloned().unwrap_or_else(|| label_for(value))
            })
            .collect();
        Self {
            options: values.to_vec(),
            labels,
            source,
        }
    }

    /// Builds a set from a dynamic mapping entry.
    fn from_enum_options(entry: &EnumOptions) -> Self {
        Self::from_values(&entry.values, entry.names.as_deref(), OptionSource::Dynamic)
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Returns the dynamic override for a field, if any.
///
/// `None` means "no dynamic override": either the field declares no source or
/// the source value has no mapping entry.
#[must_use]
pub fn dynamic_options(field: &FieldSchema, data: &Value) -> Option<OptionSet> {
    let source = field.enum_source.as_ref()?;
    let key = mapping_key(get_path(data, &source.field)?)?;
    source.mapping.get(&key).map(OptionSet::from_enum_options)
}

/// Resolves the option set for a field against the current data.
#[must_use]
pub fn resolve_options(field: &FieldSchema, data: &Value) -> OptionSet {
    if let Some(dynamic) = dynamic_options(field, data) {
        return dynamic;
    }
    if let Some(values) = &field.enum_values {
        return OptionSet::from_values(values, field.enum_names.as_deref(), OptionSource::Static);
    }
    if field.field_type == FieldType::Boolean && classify_widget(field).is_choice() {
        return OptionSet {
            options: vec![Value::Bool(true), Value::Bool(false)],
            labels: vec!["Yes".to_string(), "No".to_string()],
            source: OptionSource::BooleanDefault,
        };
    }
    OptionSet::empty()
}

/// Converts a source value into a mapping key.
///
/// Strings match verbatim; numbers and booleans match their JSON text.
fn mapping_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Renders a value as a display label.
fn label_for(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
