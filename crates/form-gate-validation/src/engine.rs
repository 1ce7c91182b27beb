// crates/form-gate-validation/src/engine.rs
// ============================================================================
// Module: JSON-Schema Engine Adapter
// Description: `jsonschema`-backed implementation of the compiler contract.
// Purpose: Compile structural schemas and report engine-neutral violations.
// Dependencies: form-gate-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! The adapter compiles a structural schema once and reports each failure as
//! a [`SchemaViolation`] carrying the failing keyword, the instance path as
//! unescaped segments, and keyword parameters read back from the schema at
//! the failing location. `required` failures report `missingProperty`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use form_gate_core::CompileError;
use form_gate_core::CompiledSchema;
use form_gate_core::SchemaCompiler;
use form_gate_core::SchemaViolation;
use jsonschema::ValidationError;
use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use serde_json::Value;
use serde_json::json;

use crate::options::SchemaDraft;
use crate::options::ValidationOptions;

// ============================================================================
// SECTION: Compiler
// ============================================================================

/// Schema compiler backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSchemaCompiler {
    /// Draft used for compilation.
    draft: SchemaDraft,
    /// Whether `format` is asserted.
    validate_formats: bool,
}

impl JsonSchemaCompiler {
    /// Creates a compiler for a draft.
    #[must_use]
    pub const fn new(draft: SchemaDraft, validate_formats: bool) -> Self {
        Self {
            draft,
            validate_formats,
        }
    }

    /// Creates a compiler from validation options.
    #[must_use]
    pub const fn from_options(options: &ValidationOptions) -> Self {
        Self::new(options.draft, options.validate_formats)
    }
}

impl Default for JsonSchemaCompiler {
    fn default() -> Self {
        Self::from_options(&ValidationOptions::default())
    }
}

impl SchemaCompiler for JsonSchemaCompiler {
    fn compile(&self, schema: &Value) -> Result<Box<dyn CompiledSchema>, CompileError> {
        let validator = jsonschema::options()
            .with_draft(self.draft.engine_draft())
            .should_validate_formats(self.validate_formats)
            .build(schema)
            .map_err(|err| CompileError::InvalidSchema(err.to_string()))?;
        Ok(Box::new(JsonSchemaValidator {
            validator,
            schema: schema.clone(),
        }))
    }
}

// ============================================================================
// SECTION: Compiled Schema
// ============================================================================

/// Compiled validator plus the source schema used for parameter lookup.
struct JsonSchemaValidator {
    /// Compiled engine validator.
    validator: Validator,
    /// Source schema.
    schema: Value,
}

impl CompiledSchema for JsonSchemaValidator {
    fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.validator.iter_errors(instance).map(|err| self.violation(&err)).collect()
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl JsonSchemaValidator {
    /// Converts an engine error into an engine-neutral violation.
    fn violation(&self, err: &ValidationError<'_>) -> SchemaViolation {
        let schema_path = err.schema_path.to_string();
        let instance_path = pointer_segments(&err.instance_path.to_string());
        let message = err.to_string();

        if let ValidationErrorKind::Required {
            property,
        } = &err.kind
        {
            let missing = match property {
                Value::String(name) => name.clone(),
                other => other.to_string(),
            };
            return SchemaViolation {
                instance_path,
                keyword: "required".to_string(),
                message,
                params: json!({ "missingProperty": missing }),
            };
        }

        let keyword = pointer_segments(&schema_path).pop().unwrap_or_default();
        let params = self
            .schema
            .pointer(&schema_path)
            .and_then(|value| keyword_params(&keyword, value))
            .unwrap_or_else(|| json!({}));
        SchemaViolation {
            instance_path,
            keyword,
            message,
            params,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Splits a JSON pointer into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Names the schema value of a keyword for message rendering.
fn keyword_params(keyword: &str, value: &Value) -> Option<Value> {
    let name = match keyword {
        "minimum" | "maximum" | "exclusiveMinimum" | "exclusiveMaximum" | "minLength"
        | "maxLength" | "minItems" | "maxItems" => "limit",
        "pattern" => "pattern",
        "enum" => "allowedValues",
        "format" => "format",
        "type" => "type",
        "const" => "allowedValue",
        _ => return None,
    };
    Some(json!({ name: value.clone() }))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
