// crates/form-gate-validation/src/field.rs
// ============================================================================
// Module: Field Validation
// Description: Single-field validation for live feedback.
// Purpose: Validate one candidate value without a full form pass.
// Dependencies: form-gate-core, serde_json
// ============================================================================

//! ## Overview
//! A field is validated through a synthetic one-property object schema so
//! the form-level message table applies unchanged; the field's `required`
//! flag lives on the wrapper. Field validation fails open: a missing field
//! definition yields no messages, and normalization or compile failures are
//! reported as diagnostics and yield no messages. A `pattern` failure uses
//! the field's custom message whenever one is declared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use form_gate_core::CompiledSchema;
use form_gate_core::DiagnosticEvent;
use form_gate_core::DiagnosticKind;
use form_gate_core::DiagnosticSink;
use form_gate_core::FieldSchema;
use form_gate_core::PATH_SEPARATOR;
use form_gate_core::SchemaCompiler;
use form_gate_core::is_present;
use serde_json::Map;
use serde_json::Value;

use crate::engine::JsonSchemaCompiler;
use crate::messages::MessageContext;
use crate::messages::humanize;
use crate::normalize::single_field_schema;
use crate::options::ValidationOptions;

// ============================================================================
// SECTION: Field Validation
// ============================================================================

/// Validates one field value with the default engine.
///
/// `field_path` is the composite `section.field` path; its last segment names
/// the field in messages when the field has no title.
pub fn validate_field(
    field: Option<&FieldSchema>,
    value: Option<&Value>,
    field_path: &str,
    options: &ValidationOptions,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<String> {
    let compiler = JsonSchemaCompiler::from_options(options);
    validate_field_with(&compiler, field, value, field_path, options.group_digits, diagnostics)
}

/// Validates one field value with a caller-supplied compiler.
pub fn validate_field_with(
    compiler: &dyn SchemaCompiler,
    field: Option<&FieldSchema>,
    value: Option<&Value>,
    field_path: &str,
    group_digits: bool,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<String> {
    let Some(field) = field else {
        return Vec::new();
    };
    let key = field_key(field_path);
    let schema = match single_field_schema(key, field) {
        Ok(schema) => schema,
        Err(err) => {
            diagnostics.record(
                &DiagnosticEvent::new(
                    DiagnosticKind::FieldSchemaUnusable,
                    "field schema unusable; validation skipped",
                )
                .with_field(field_path)
                .with_detail(err.to_string()),
            );
            return Vec::new();
        }
    };
    match compiler.compile(&schema) {
        Ok(compiled) => field_messages(compiled.as_ref(), field, key, value, group_digits),
        Err(err) => {
            diagnostics.record(
                &DiagnosticEvent::new(
                    DiagnosticKind::FieldValidatorCompileFailed,
                    "field validator failed to compile; validation skipped",
                )
                .with_field(field_path)
                .with_detail(err.to_string()),
            );
            Vec::new()
        }
    }
}

/// Runs a compiled single-field schema and renders its violations.
pub(crate) fn field_messages(
    compiled: &dyn CompiledSchema,
    field: &FieldSchema,
    key: &str,
    value: Option<&Value>,
    group_digits: bool,
) -> Vec<String> {
    let mut instance = Map::new();
    if let Some(value) = value.filter(|value| is_present(Some(value))) {
        instance.insert(key.to_string(), value.clone());
    }
    let context = MessageContext {
        label: field.label(key),
        custom_message: field.validation_message.as_deref(),
        group_digits: field.group_digits.unwrap_or(group_digits),
    };
    compiled
        .validate(&Value::Object(instance))
        .iter()
        .map(|violation| humanize(violation, context))
        .collect()
}

/// Returns the field key of a composite path.
pub(crate) fn field_key(field_path: &str) -> &str {
    field_path.split_once(PATH_SEPARATOR).map_or(field_path, |(_, key)| key)
}
