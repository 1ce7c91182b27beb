// crates/form-gate-core/src/runtime/condition.rs
// ============================================================================
// Module: Form Gate Condition Evaluation
// Description: Operator evaluation for single rule conditions.
// Purpose: Decide whether one condition holds against the current form data.
// Dependencies: crate::core, crate::diagnostics, serde_json
// ============================================================================

//! ## Overview
//! Conditions resolve their target by dot-path and compare it to a literal
//! operand. Missing targets resolve to "absent" and never fail. Equality is
//! strict (no type coercion) except that numbers compare by value, so `1` and
//! `1.0` are equal. A condition without a `value` equals an absent target,
//! while an explicit `null` operand only equals a `null` value. Ordering
//! operators require both sides to be numbers.
//! Unknown operators evaluate to `true` and emit a diagnostic so a malformed
//! rule degrades to "show/enable" rather than breaking the form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::Condition;
use crate::core::ConditionOperator;
use crate::core::path::get_path;
use crate::core::path::is_present;
use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::DiagnosticSink;

// ============================================================================
// SECTION: Condition Evaluation
// ============================================================================

/// Evaluates a condition against the form data.
pub fn evaluate_condition(
    condition: &Condition,
    data: &Value,
    diagnostics: &dyn DiagnosticSink,
) -> bool {
    let actual = get_path(data, &condition.field);
    let operand = condition.value.as_ref().unwrap_or(&Value::Null);

    match &condition.operator {
        ConditionOperator::Exists => is_present(actual),
        ConditionOperator::NotExists => !is_present(actual),
        ConditionOperator::Equals => optional_equals(actual, condition.value.as_ref()),
        ConditionOperator::NotEquals => !optional_equals(actual, condition.value.as_ref()),
        ConditionOperator::In => {
            membership(condition, actual, operand, diagnostics).unwrap_or(false)
        }
        ConditionOperator::NotIn => {
            membership(condition, actual, operand, diagnostics).is_some_and(|found| !found)
        }
        ConditionOperator::GreaterThan => {
            compare_numbers(actual, operand).is_some_and(std::cmp::Ordering::is_gt)
        }
        ConditionOperator::LessThan => {
            compare_numbers(actual, operand).is_some_and(std::cmp::Ordering::is_lt)
        }
        ConditionOperator::Unknown(name) => {
            diagnostics.record(
                &DiagnosticEvent::new(
                    DiagnosticKind::UnknownOperator,
                    "unknown condition operator; condition treated as satisfied",
                )
                .with_field(condition.field.clone())
                .with_detail(name.clone()),
            );
            true
        }
    }
}

/// Tests membership of the resolved value in an array operand.
///
/// Returns `None` when the operand is not an array.
fn membership(
    condition: &Condition,
    actual: Option<&Value>,
    operand: &Value,
    diagnostics: &dyn DiagnosticSink,
) -> Option<bool> {
    let Value::Array(candidates) = operand else {
        diagnostics.record(
            &DiagnosticEvent::new(
                DiagnosticKind::InvalidOperand,
                "membership operator requires an array operand",
            )
            .with_field(condition.field.clone())
            .with_detail(condition.operator.as_str().to_string()),
        );
        return None;
    };
    let Some(actual) = actual else {
        return Some(false);
    };
    Some(candidates.iter().any(|candidate| strict_equals(actual, candidate)))
}

// ============================================================================
// SECTION: Comparison Helpers
// ============================================================================

/// Compares two JSON values without type coercion.
#[must_use]
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
                return left == right;
            }
            if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
                return left == right;
            }
            match (left.as_f64(), right.as_f64()) {
                #[allow(clippy::float_cmp, reason = "Strict equality mirrors exact value comparison.")]
                (Some(left), Some(right)) => left == right,
                _ => false,
            }
        }
        _ => left == right,
    }
}

/// Compares a possibly absent target with a possibly absent operand.
fn optional_equals(actual: Option<&Value>, operand: Option<&Value>) -> bool {
    match (actual, operand) {
        (Some(actual), Some(operand)) => strict_equals(actual, operand),
        (None, None) => true,
        _ => false,
    }
}

/// Orders two values when both are JSON numbers.
fn compare_numbers(actual: Option<&Value>, operand: &Value) -> Option<std::cmp::Ordering> {
    let left = actual?.as_number()?;
    let right = operand.as_number()?;
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return Some(left.cmp(&right));
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return Some(left.cmp(&right));
    }
    left.as_f64()?.partial_cmp(&right.as_f64()?)
}
