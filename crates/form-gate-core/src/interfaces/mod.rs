// crates/form-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Form Gate Interfaces
// Description: Engine-agnostic contract for structural schema validation.
// Purpose: Decouple form validation from any specific JSON-Schema engine.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Form and field validation depend only on this contract: compile a schema
//! once, then validate instances into an ordered list of
//! [`SchemaViolation`]s. Compiled artifacts are immutable and may be shared or
//! rebuilt per call at the caller's discretion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// One structural validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// Location of the failing value as unescaped path segments.
    pub instance_path: Vec<String>,
    /// Failing keyword (`required`, `minimum`, ...).
    pub keyword: String,
    /// Raw engine message.
    pub message: String,
    /// Keyword parameters (`limit`, `missingProperty`, `allowedValues`, ...).
    pub params: Value,
}

impl SchemaViolation {
    /// Returns a named parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }
}

// ============================================================================
// SECTION: Compiler Contract
// ============================================================================

/// Schema compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The schema was rejected by the engine.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Compiled, reusable structural validator.
pub trait CompiledSchema: Send + Sync {
    /// Validates an instance, returning failures in engine-report order.
    fn validate(&self, instance: &Value) -> Vec<SchemaViolation>;

    /// Returns true when the instance has no failures.
    fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_empty()
    }
}

/// Structural validation engine.
pub trait SchemaCompiler: Send + Sync {
    /// Compiles a schema into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the schema is malformed.
    fn compile(&self, schema: &Value) -> Result<Box<dyn CompiledSchema>, CompileError>;
}
