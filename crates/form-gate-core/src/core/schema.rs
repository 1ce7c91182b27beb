// crates/form-gate-core/src/core/schema.rs
// ============================================================================
// Module: Form Gate Schema Model
// Description: Sections, fields, and UI metadata for declarative forms.
// Purpose: Define canonical, serializable form schemas with validation helpers.
// Dependencies: crate::core::rule, indexmap, serde, serde_json
// ============================================================================

//! ## Overview
//! A form schema is an ordered list of sections, each holding an ordered map
//! of field keys to field schemas. UI metadata lives under `ui:`-prefixed keys
//! and never reaches the structural validator. Unknown keys are preserved on
//! fields so JSON-Schema constraints such as `minLength` pass through intact.
//! Schemas are validated at load time to enforce unique, dot-free section ids.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::core::rule::Rule;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key prefix reserved for UI-only metadata.
pub const UI_PREFIX: &str = "ui:";
/// Separator used by dot-notation field paths.
pub const PATH_SEPARATOR: char = '.';

// ============================================================================
// SECTION: Form Schema
// ============================================================================

/// Canonical form schema.
///
/// # Invariants
/// - Section ids are unique, non-empty, and contain no path separator.
/// - The schema is never mutated by the evaluation or validation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Optional form title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections in render order.
    #[serde(default)]
    pub sections: Vec<SectionSchema>,
}

impl FormSchema {
    /// Parses a form schema from a JSON value and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the value does not describe a valid form.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let schema: Self =
            serde_json::from_value(value).map_err(|err| SchemaError::Parse(err.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parses a form schema from JSON text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the text does not describe a valid form.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Self =
            serde_json::from_str(text).map_err(|err| SchemaError::Parse(err.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Validates schema invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when section ids are empty, duplicated, or
    /// contain the path separator, or when a field key is empty. Rules are
    /// never rejected here; malformed conditions degrade at evaluation time.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(SchemaError::EmptySectionId);
            }
            if section.id.contains(PATH_SEPARATOR) {
                return Err(SchemaError::InvalidSectionId(section.id.clone()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(SchemaError::DuplicateSection(section.id.clone()));
            }
            if section.properties.keys().any(String::is_empty) {
                return Err(SchemaError::EmptyFieldKey(section.id.clone()));
            }
        }
        Ok(())
    }

    /// Returns the section with the given id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&SectionSchema> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Resolves a `section.field` path to its section and field schema.
    ///
    /// Returns `None` when any segment cannot be resolved.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<(&SectionSchema, &FieldSchema)> {
        let (section_id, key) = path.split_once(PATH_SEPARATOR)?;
        let section = self.section(section_id)?;
        let field = section.properties.get(key)?;
        Some((section, field))
    }

    /// Iterates over every field as `(section, key, field)` in render order.
    pub fn fields(&self) -> impl Iterator<Item = (&SectionSchema, &str, &FieldSchema)> {
        self.sections.iter().flat_map(|section| {
            section.properties.iter().map(move |(key, field)| (section, key.as_str(), field))
        })
    }
}

/// Builds the composite `section.field` path for a field key.
#[must_use]
pub fn field_path(section_id: &str, key: &str) -> String {
    format!("{section_id}{PATH_SEPARATOR}{key}")
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Named, ordered group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSchema {
    /// Section identifier (first segment of field paths).
    pub id: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered field definitions.
    #[serde(default)]
    pub properties: FieldMap,
    /// Visibility rule; sections default to visible.
    #[serde(rename = "ui:show", default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Rule>,
    /// Disablement rule; sections default to enabled.
    #[serde(rename = "ui:disabled", default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Rule>,
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Primitive field type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    String,
    /// Any JSON number.
    Number,
    /// Whole numbers only.
    Integer,
    /// True or false.
    Boolean,
}

impl FieldType {
    /// Returns the canonical JSON-Schema type label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Returns true for numeric types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf schema describing one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Primitive type tag.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label used in messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field must be provided.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Static allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Display names aligned with `enum_values`.
    #[serde(rename = "enumNames", default, skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<String>>,
    /// Inclusive lower bound for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Inclusive upper bound for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Input step hint for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Number>,
    /// String format (`email`, `date`, `uri`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Regular expression the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Custom message used for `pattern` failures.
    #[serde(rename = "validationMessage", default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    /// Visibility rule; fields default to visible.
    #[serde(rename = "ui:show", default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Rule>,
    /// Disablement rule; fields default to enabled.
    #[serde(rename = "ui:disabled", default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Rule>,
    /// Options keyed by another field's current value.
    #[serde(rename = "ui:enumSource", default, skip_serializing_if = "Option::is_none")]
    pub enum_source: Option<DynamicEnumSource>,
    /// Explicit widget hint.
    #[serde(rename = "ui:widget", default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Placeholder text (inert).
    #[serde(rename = "ui:placeholder", default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text (inert).
    #[serde(rename = "ui:help", default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Grouped-digit rendering of numeric limits in messages.
    #[serde(rename = "ui:groupDigits", default, skip_serializing_if = "Option::is_none")]
    pub group_digits: Option<bool>,
    /// Remaining keys, forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSchema {
    /// Creates a field of the given type with no constraints.
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            title: None,
            description: None,
            required: false,
            enum_values: None,
            enum_names: None,
            minimum: None,
            maximum: None,
            step: None,
            format: None,
            pattern: None,
            validation_message: None,
            show: None,
            disabled: None,
            enum_source: None,
            widget: None,
            placeholder: None,
            help: None,
            group_digits: None,
            extra: Map::new(),
        }
    }

    /// Returns the label used in messages: the title, else the given key.
    #[must_use]
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(key)
    }
}

/// Serde helper for skipping false flags.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Serde skip helpers take references.")]
const fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// SECTION: Dynamic Enumerations
// ============================================================================

/// Option list keyed by another field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicEnumSource {
    /// Dot-path of the source field.
    pub field: String,
    /// Options per source value.
    #[serde(default)]
    pub mapping: BTreeMap<String, EnumOptions>,
}

/// Allowed values with optional display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOptions {
    /// Allowed values.
    #[serde(rename = "enum", default)]
    pub values: Vec<Value>,
    /// Display names aligned with `values`.
    #[serde(rename = "enumNames", default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
}

// ============================================================================
// SECTION: Ordered Field Map
// ============================================================================

/// Field keys mapped to field schemas in declaration order.
pub type FieldMap = IndexMap<String, FieldSchema>;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema parsing and invariant errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema document could not be parsed.
    #[error("schema parse error: {0}")]
    Parse(String),
    /// A section has an empty id.
    #[error("section id must be non-empty")]
    EmptySectionId,
    /// A section id contains the path separator.
    #[error("section id {0} must not contain '.'")]
    InvalidSectionId(String),
    /// Two sections share an id.
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
    /// A field key is empty.
    #[error("section {0} declares an empty field key")]
    EmptyFieldKey(String),
}
