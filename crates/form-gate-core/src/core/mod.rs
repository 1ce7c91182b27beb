// crates/form-gate-core/src/core/mod.rs
// ============================================================================
// Module: Form Gate Core Types
// Description: Canonical form schema, rule, path, and validation-error types.
// Purpose: Provide stable, serializable types shared by evaluation and validation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the persisted form schema, the rule vocabulary, dot-path
//! helpers, and the path-addressed error map. These types are the canonical
//! source of truth for every derived surface (CLI, embedders).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod path;
pub mod rule;
pub mod schema;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use path::PathError;
pub use path::get_path;
pub use path::is_present;
pub use path::set_path;
pub use rule::Condition;
pub use rule::ConditionOperator;
pub use rule::Rule;
pub use rule::RuleLogic;
pub use schema::DynamicEnumSource;
pub use schema::EnumOptions;
pub use schema::FieldMap;
pub use schema::FieldSchema;
pub use schema::FieldType;
pub use schema::FormSchema;
pub use schema::PATH_SEPARATOR;
pub use schema::SchemaError;
pub use schema::SectionSchema;
pub use schema::UI_PREFIX;
pub use schema::field_path;
pub use validation::ROOT_PATH;
pub use validation::ValidationErrors;
