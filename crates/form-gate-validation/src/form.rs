// crates/form-gate-validation/src/form.rs
// ============================================================================
// Module: Form Validation
// Description: Whole-form validation with path-addressed messages.
// Purpose: Validate a data snapshot and map failures onto field paths.
// Dependencies: form-gate-core, indexmap, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`FormValidator`] normalizes and compiles a form schema once, then
//! validates snapshots against it. Snapshots are flattened to the same
//! `section.field` keys the normalized schema uses; absent, null, and empty
//! string values are omitted so `required` reports them as missing.
//! Failures are keyed by dotted path. A `required` failure is attributed to
//! the missing child's path rather than its parent; failures with no path
//! land on `root`. Schema normalization or compilation failures are returned
//! as [`FormValidationError`], never mixed into [`ValidationErrors`].
//!
//! Single-field validators are compiled lazily and cached per path, bounded
//! by [`ValidationOptions::max_cached_validators`]. The least recently used
//! validator is evicted first. Compilation runs outside the cache lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use form_gate_core::CompileError;
use form_gate_core::CompiledSchema;
use form_gate_core::DiagnosticEvent;
use form_gate_core::DiagnosticKind;
use form_gate_core::DiagnosticSink;
use form_gate_core::FieldSchema;
use form_gate_core::FormSchema;
use form_gate_core::PATH_SEPARATOR;
use form_gate_core::ROOT_PATH;
use form_gate_core::SchemaCompiler;
use form_gate_core::SchemaViolation;
use form_gate_core::ValidationErrors;
use form_gate_core::field_path;
use form_gate_core::is_present;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::engine::JsonSchemaCompiler;
use crate::field::field_key;
use crate::field::field_messages;
use crate::messages::MessageContext;
use crate::messages::humanize;
use crate::normalize::NormalizeError;
use crate::normalize::normalize_form;
use crate::normalize::single_field_schema;
use crate::options::ValidationOptions;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while preparing a form validator.
///
/// # Invariants
/// - Variants describe schema defects, never user data failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormValidationError {
    /// The schema could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    /// The normalized schema was rejected by the engine.
    #[error("schema compilation failed: {0}")]
    Compile(#[from] CompileError),
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Outcome of a whole-form validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidationResult {
    /// True when no failures were reported.
    pub valid: bool,
    /// Failure messages keyed by dotted path.
    pub errors: ValidationErrors,
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compiled validator for one form schema.
pub struct FormValidator {
    /// Source form schema.
    schema: FormSchema,
    /// Normalized structural schema.
    normalized: Value,
    /// Compiled whole-form validator.
    compiled: Box<dyn CompiledSchema>,
    /// Compiler used for single-field validators.
    compiler: Box<dyn SchemaCompiler>,
    /// Validation settings.
    options: ValidationOptions,
    /// Single-field validators keyed by composite path, most recent last.
    field_validators: Mutex<IndexMap<String, Arc<dyn CompiledSchema>>>,
}

impl FormValidator {
    /// Builds a validator with the default engine.
    ///
    /// # Errors
    ///
    /// Returns [`FormValidationError`] when the schema cannot be normalized
    /// or compiled.
    pub fn new(schema: FormSchema, options: ValidationOptions) -> Result<Self, FormValidationError> {
        let compiler = JsonSchemaCompiler::from_options(&options);
        Self::with_compiler(schema, options, Box::new(compiler))
    }

    /// Builds a validator with a caller-supplied compiler.
    ///
    /// # Errors
    ///
    /// Returns [`FormValidationError`] when the schema cannot be normalized
    /// or compiled.
    pub fn with_compiler(
        schema: FormSchema,
        options: ValidationOptions,
        compiler: Box<dyn SchemaCompiler>,
    ) -> Result<Self, FormValidationError> {
        let normalized = normalize_form(&schema)?;
        let compiled = compiler.compile(&normalized)?;
        Ok(Self {
            schema,
            normalized,
            compiled,
            compiler,
            options,
            field_validators: Mutex::new(IndexMap::new()),
        })
    }

    /// Returns the source form schema.
    #[must_use]
    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the normalized structural schema.
    #[must_use]
    pub const fn normalized_schema(&self) -> &Value {
        &self.normalized
    }

    /// Returns the validation settings.
    #[must_use]
    pub const fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Returns the number of cached single-field validators.
    #[must_use]
    pub fn cached_field_validators(&self) -> usize {
        self.field_validators.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Validates a form data snapshot.
    #[must_use]
    pub fn validate(&self, data: &Value) -> FormValidationResult {
        let instance = flatten_form_data(&self.schema, data);
        let mut errors = ValidationErrors::new();
        for violation in self.compiled.validate(&instance) {
            let path = violation_path(&violation);
            let message = self.message_for(&path, &violation);
            errors.push(path, message);
        }
        FormValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validates one field value by composite path.
    ///
    /// Unknown paths and unusable field schemas yield no messages.
    pub fn validate_field(
        &self,
        path: &str,
        value: Option<&Value>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Vec<String> {
        let Some((_, field)) = self.schema.field(path) else {
            return Vec::new();
        };
        let key = field_key(path);
        match self.field_validator(path, key, field) {
            Ok(compiled) => {
                field_messages(compiled.as_ref(), field, key, value, self.options.group_digits)
            }
            Err(err) => {
                let kind = match err {
                    FormValidationError::Normalize(_) => DiagnosticKind::FieldSchemaUnusable,
                    FormValidationError::Compile(_) => DiagnosticKind::FieldValidatorCompileFailed,
                };
                diagnostics.record(
                    &DiagnosticEvent::new(kind, "field validation skipped")
                        .with_field(path)
                        .with_detail(err.to_string()),
                );
                Vec::new()
            }
        }
    }

    /// Returns the cached single-field validator for a path, compiling it on
    /// first use.
    fn field_validator(
        &self,
        path: &str,
        key: &str,
        field: &FieldSchema,
    ) -> Result<Arc<dyn CompiledSchema>, FormValidationError> {
        if let Some(compiled) = self.touch_field_validator(path) {
            return Ok(compiled);
        }
        let schema = single_field_schema(key, field)?;
        let compiled: Arc<dyn CompiledSchema> = Arc::from(self.compiler.compile(&schema)?);

        let mut cache = self.field_validators.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = cache.get(path) {
            return Ok(Arc::clone(existing));
        }
        while cache.len() >= self.options.max_cached_validators.max(1) {
            if cache.shift_remove_index(0).is_none() {
                break;
            }
        }
        cache.insert(path.to_string(), Arc::clone(&compiled));
        drop(cache);
        Ok(compiled)
    }

    /// Returns a cached validator and marks it most recently used.
    fn touch_field_validator(&self, path: &str) -> Option<Arc<dyn CompiledSchema>> {
        let mut cache = self.field_validators.lock().unwrap_or_else(PoisonError::into_inner);
        let index = cache.get_index_of(path)?;
        let last = cache.len().saturating_sub(1);
        cache.move_index(index, last);
        cache.get_index(last).map(|(_, compiled)| Arc::clone(compiled))
    }

    /// Renders a violation using the field declared at `path`, if any.
    fn message_for(&self, path: &str, violation: &SchemaViolation) -> String {
        match self.schema.field(path) {
            Some((_, field)) => {
                let key = field_key(path);
                humanize(
                    violation,
                    MessageContext {
                        label: field.label(key),
                        custom_message: field.validation_message.as_deref(),
                        group_digits: field.group_digits.unwrap_or(self.options.group_digits),
                    },
                )
            }
            None => humanize(
                violation,
                MessageContext {
                    label: path.rsplit(PATH_SEPARATOR).next().unwrap_or(path),
                    custom_message: None,
                    group_digits: self.options.group_digits,
                },
            ),
        }
    }
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Validates a form snapshot against a schema in one call.
///
/// # Errors
///
/// Returns [`FormValidationError`] when the schema cannot be normalized or
/// compiled.
pub fn validate_form(
    schema: &FormSchema,
    data: &Value,
    options: &ValidationOptions,
) -> Result<FormValidationResult, FormValidationError> {
    Ok(FormValidator::new(schema.clone(), *options)?.validate(data))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens sectioned data into `section.field` keys.
///
/// Only declared fields are carried over, and only when their value is
/// present.
#[must_use]
pub fn flatten_form_data(schema: &FormSchema, data: &Value) -> Value {
    let mut flat = Map::new();
    for section in &schema.sections {
        let Some(values) = data.get(&section.id) else {
            continue;
        };
        for (key, _) in section.properties.iter() {
            if let Some(value) = values.get(key)
                && is_present(Some(value))
            {
                flat.insert(field_path(&section.id, key), value.clone());
            }
        }
    }
    Value::Object(flat)
}

/// Derives the dotted path a violation belongs to.
fn violation_path(violation: &SchemaViolation) -> String {
    let mut segments = violation.instance_path.clone();
    if violation.keyword == "required"
        && let Some(missing) = violation.param("missingProperty").and_then(Value::as_str)
    {
        segments.push(missing.to_string());
    }
    if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        segments.join(".")
    }
}
