// crates/form-gate-core/src/runtime/state.rs
// ============================================================================
// Module: Form Gate State Computation
// Description: One-pass derivation of visibility, disablement, and options.
// Purpose: Give the render layer a single pure entry point per data change.
// Dependencies: crate::{core, diagnostics, runtime}, serde, serde_json
// ============================================================================

//! ## Overview
//! The render layer owns the mutable data snapshot and calls
//! [`compute_form_state`] after every mutation. Nothing is cached between
//! calls; the cost is linear in schema size. Missing section entries are
//! filled with empty objects on a copy before rules run, so rule evaluation
//! never observes a missing section.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::FormSchema;
use crate::core::field_path;
use crate::diagnostics::DiagnosticSink;
use crate::runtime::options::OptionSet;
use crate::runtime::options::resolve_options;
use crate::runtime::rule::is_field_disabled;
use crate::runtime::rule::is_section_disabled;
use crate::runtime::rule::is_visible;
use crate::runtime::widget::WidgetKind;
use crate::runtime::widget::classify_widget;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Derived state for a whole form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    /// Section states in render order.
    pub sections: Vec<SectionState>,
}

impl FormState {
    /// Returns the state of a section.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&SectionState> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Returns the state of a field by `section.field` path.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<&FieldState> {
        self.sections.iter().flat_map(|section| section.fields.iter()).find(|f| f.path == path)
    }
}

/// Derived state for a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionState {
    /// Section identifier.
    pub id: String,
    /// Whether the section is shown.
    pub visible: bool,
    /// Whether the section is disabled.
    pub disabled: bool,
    /// Field states in declaration order.
    pub fields: Vec<FieldState>,
}

/// Derived state for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    /// Field key within its section.
    pub key: String,
    /// Composite `section.field` path.
    pub path: String,
    /// Whether the field's own rule shows it.
    pub visible: bool,
    /// Effective disabled state (section disablement cascades).
    pub disabled: bool,
    /// Selected widget.
    pub widget: WidgetKind,
    /// Valid options for the field.
    pub options: OptionSet,
}

// ============================================================================
// SECTION: Computation
// ============================================================================

/// Returns a copy of `data` where every declared section maps to an object.
///
/// Non-object data is replaced by an object; non-object section entries are
/// left as-is.
#[must_use]
pub fn with_declared_sections(schema: &FormSchema, data: &Value) -> Value {
    let mut map = match data {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    for section in &schema.sections {
        map.entry(section.id.clone()).or_insert_with(|| Value::Object(Map::new()));
    }
    Value::Object(map)
}

/// Computes visibility, disablement, widgets, and options for every section
/// and field.
pub fn compute_form_state(
    schema: &FormSchema,
    data: &Value,
    diagnostics: &dyn DiagnosticSink,
) -> FormState {
    let data = with_declared_sections(schema, data);
    let sections = schema
        .sections
        .iter()
        .map(|section| {
            let visible = is_visible(section.show.as_ref(), &data, diagnostics);
            let disabled = is_section_disabled(section.disabled.as_ref(), &data, diagnostics);
            let fields = section
                .properties
                .iter()
                .map(|(key, field)| FieldState {
                    key: key.to_string(),
                    path: field_path(&section.id, key),
                    visible: is_visible(field.show.as_ref(), &data, diagnostics),
                    disabled: is_field_disabled(
                        disabled,
                        field.disabled.as_ref(),
                        &data,
                        diagnostics,
                    ),
                    widget: classify_widget(field),
                    options: resolve_options(field, &data),
                })
                .collect();
            SectionState {
                id: section.id.clone(),
                visible,
                disabled,
                fields,
            }
        })
        .collect();
    FormState {
        sections,
    }
}
