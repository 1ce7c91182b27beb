// crates/form-gate-core/src/runtime/widget.rs
// ============================================================================
// Module: Form Gate Widget Classification
// Description: Pure mapping from field schema to a closed set of widgets.
// Purpose: Keep input-kind selection testable outside the render layer.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Precedence: explicit `ui:widget` hint, then enum presence (static or
//! dynamic), then type, then string format. Unrecognized hints are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::FieldSchema;
use crate::core::FieldType;

// ============================================================================
// SECTION: Widget Kinds
// ============================================================================

/// Input widget variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Dropdown choice.
    Select,
    /// Multi-line text.
    Textarea,
    /// Boolean checkbox.
    Checkbox,
    /// Radio group choice.
    Radio,
    /// Single-line text.
    Text,
    /// Numeric text input.
    NumberText,
    /// Date picker.
    Date,
    /// Email input.
    Email,
    /// URL input.
    Url,
}

impl WidgetKind {
    /// Parses a widget hint label.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "select" | "dropdown" => Some(Self::Select),
            "textarea" => Some(Self::Textarea),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "text" => Some(Self::Text),
            "number" | "number_text" | "number-text" | "updown" => Some(Self::NumberText),
            "date" => Some(Self::Date),
            "email" => Some(Self::Email),
            "url" | "uri" => Some(Self::Url),
            _ => None,
        }
    }

    /// Returns true for choice-style widgets.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Selects the widget for a field.
#[must_use]
pub fn classify_widget(field: &FieldSchema) -> WidgetKind {
    if let Some(kind) = field.widget.as_deref().and_then(WidgetKind::from_hint) {
        return kind;
    }
    if field.enum_values.is_some() || field.enum_source.is_some() {
        return WidgetKind::Select;
    }
    match field.field_type {
        FieldType::Boolean => WidgetKind::Checkbox,
        FieldType::Number | FieldType::Integer => WidgetKind::NumberText,
        FieldType::String => match field.format.as_deref() {
            Some("date") => WidgetKind::Date,
            Some("email") => WidgetKind::Email,
            Some("uri" | "url") => WidgetKind::Url,
            _ => WidgetKind::Text,
        },
    }
}
