// crates/form-gate-core/src/lib.rs
// ============================================================================
// Module: Form Gate Core Library
// Description: Public API surface for the Form Gate core.
// Purpose: Expose schema types, rule evaluation, and the validation contract.
// Dependencies: crate::{core, diagnostics, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Form Gate core decides, for a declarative form schema and a data snapshot,
//! which sections and fields are visible or disabled, which options are valid,
//! and which widget each field uses. Structural validation is reached only
//! through the [`SchemaCompiler`] contract so engines stay swappable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod diagnostics;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use diagnostics::DiagnosticEvent;
pub use diagnostics::DiagnosticKind;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::FileDiagnosticSink;
pub use diagnostics::MemoryDiagnosticSink;
pub use diagnostics::NoopDiagnosticSink;
pub use diagnostics::StderrDiagnosticSink;
pub use interfaces::CompileError;
pub use interfaces::CompiledSchema;
pub use interfaces::SchemaCompiler;
pub use interfaces::SchemaViolation;
pub use runtime::FieldState;
pub use runtime::FormState;
pub use runtime::OptionSet;
pub use runtime::OptionSource;
pub use runtime::SectionState;
pub use runtime::WidgetKind;
pub use runtime::classify_widget;
pub use runtime::compute_form_state;
pub use runtime::dynamic_options;
pub use runtime::evaluate_condition;
pub use runtime::evaluate_rule;
pub use runtime::is_field_disabled;
pub use runtime::resolve_options;
pub use runtime::with_declared_sections;
