// crates/form-gate-validation/src/messages.rs
// ============================================================================
// Module: Violation Messages
// Description: Human-readable messages for engine violations.
// Purpose: Turn keyword-level failures into text suitable for end users.
// Dependencies: form-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Each violation renders from its keyword and parameters. Numeric limits are
//! digit-grouped (`1,000`) unless grouping is disabled. A custom message
//! replaces the default text for `pattern` failures only. Keywords without a
//! dedicated rendering fall back to the engine message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use form_gate_core::SchemaViolation;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Field context for rendering a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageContext<'a> {
    /// Field label used in `required` messages.
    pub label: &'a str,
    /// Custom message for `pattern` failures.
    pub custom_message: Option<&'a str>,
    /// Whether numeric limits are digit-grouped.
    pub group_digits: bool,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Fallback text for `pattern` failures without a custom message.
pub const DEFAULT_PATTERN_MESSAGE: &str = "Invalid format";

/// Renders a violation for display.
#[must_use]
pub fn humanize(violation: &SchemaViolation, context: MessageContext<'_>) -> String {
    let rendered = match violation.keyword.as_str() {
        "required" => Some(format!("{} is required", context.label)),
        "pattern" => {
            Some(context.custom_message.unwrap_or(DEFAULT_PATTERN_MESSAGE).to_string())
        }
        "minimum" => limit_message(violation, "Value must be at least", context.group_digits),
        "maximum" => limit_message(violation, "Value must be at most", context.group_digits),
        "enum" => violation
            .param("allowedValues")
            .and_then(Value::as_array)
            .map(|values| format!("Value must be one of: {}", list_values(values))),
        "format" => {
            violation.param("format").and_then(Value::as_str).map(|f| format!("Invalid {f} format"))
        }
        "type" => violation.param("type").and_then(type_label).map(|t| format!("Value must be a {t}")),
        _ => None,
    };
    rendered.unwrap_or_else(|| violation.message.clone())
}

/// Renders a numeric limit message.
fn limit_message(violation: &SchemaViolation, prefix: &str, group_digits: bool) -> Option<String> {
    let limit = violation.param("limit")?.as_number()?;
    Some(format!("{prefix} {}", format_number(limit, group_digits)))
}

/// Joins allowed values for display; strings are shown unquoted.
fn list_values(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a `type` keyword value.
fn type_label(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Array(names) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            if names.is_empty() { None } else { Some(names.join(" or ")) }
        }
        _ => None,
    }
}

// ============================================================================
// SECTION: Number Formatting
// ============================================================================

/// Formats a number for display, optionally grouping integer digits by three.
#[must_use]
pub fn format_number(number: &Number, group_digits: bool) -> String {
    let text = if let Some(value) = number.as_i64() {
        value.to_string()
    } else if let Some(value) = number.as_u64() {
        value.to_string()
    } else if let Some(value) = number.as_f64() {
        value.to_string()
    } else {
        number.to_string()
    };
    if group_digits { group_text(&text) } else { text }
}

/// Inserts thousands separators into a plain decimal rendering.
fn group_text(text: &str) -> String {
    let (sign, unsigned) = text.strip_prefix('-').map_or(("", text), |rest| ("-", rest));
    let (integer, fraction) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));
    if integer.is_empty() || !integer.bytes().all(|byte| byte.is_ascii_digit()) {
        return text.to_string();
    }

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

// ============================================================================
// SECTION: Tests
// ============================================================================
