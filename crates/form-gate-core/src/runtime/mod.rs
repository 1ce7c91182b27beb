// crates/form-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Form Gate Runtime
// Description: Pure evaluation of conditions, rules, options, and widgets.
// Purpose: Derive form semantics from a schema and a data snapshot.
// Dependencies: crate::{core, diagnostics}
// ============================================================================

//! ## Overview
//! Runtime modules are pure functions over an immutable schema and a data
//! snapshot. They hold no state between calls and are safe to invoke
//! concurrently on independent inputs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod condition;
pub mod options;
pub mod rule;
pub mod state;
pub mod widget;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use condition::evaluate_condition;
pub use condition::strict_equals;
pub use options::OptionSet;
pub use options::OptionSource;
pub use options::dynamic_options;
pub use options::resolve_options;
pub use rule::evaluate_rule;
pub use rule::is_field_disabled;
pub use rule::is_section_disabled;
pub use rule::is_visible;
pub use state::FieldState;
pub use state::FormState;
pub use state::SectionState;
pub use state::compute_form_state;
pub use state::with_declared_sections;
pub use widget::WidgetKind;
pub use widget::classify_widget;
