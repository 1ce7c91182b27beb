// crates/form-gate-validation/src/lib.rs
// ============================================================================
// Module: Form Gate Validation Library
// Description: Schema normalization and structural validation for forms.
// Purpose: Produce humanized, path-addressed validation messages.
// Dependencies: form-gate-core, jsonschema, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate turns a form schema into a structural JSON Schema, validates
//! data snapshots or single field values with the `jsonschema` engine, and
//! renders engine failures as user-facing messages keyed by `section.field`
//! paths. The engine is reached only through the core compiler contract.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod engine;
pub mod field;
pub mod form;
pub mod messages;
pub mod normalize;
pub mod options;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::JsonSchemaCompiler;
pub use field::validate_field;
pub use field::validate_field_with;
pub use form::FormValidationError;
pub use form::FormValidationResult;
pub use form::FormValidator;
pub use form::flatten_form_data;
pub use form::validate_form;
pub use messages::MessageContext;
pub use messages::format_number;
pub use messages::humanize;
pub use normalize::NormalizeError;
pub use normalize::field_leaf_schema;
pub use normalize::normalize;
pub use normalize::normalize_form;
pub use normalize::single_field_schema;
pub use normalize::strip_ui_keys;
pub use options::DEFAULT_MAX_CACHED_VALIDATORS;
pub use options::SchemaDraft;
pub use options::ValidationOptions;
