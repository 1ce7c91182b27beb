// crates/form-gate-core/src/runtime/rule.rs
// ============================================================================
// Module: Form Gate Rule Aggregation
// Description: AND/OR combination of conditions into show/disable decisions.
// Purpose: Evaluate visibility and disablement rules with typed defaults.
// Dependencies: crate::{core, diagnostics, runtime::condition}, serde_json
// ============================================================================

//! ## Overview
//! Absent rules and rules without conditions return the caller's default.
//! `and` short-circuits on the first false condition, `or` on the first true
//! one, and unknown combination modes evaluate as `and`.
//!
//! ## Invariants
//! - Section disablement cascades: a field inside a disabled section is
//!   disabled regardless of its own rule.
//! - Visibility does not cascade; callers skip fields of hidden sections.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::Rule;
use crate::core::RuleLogic;
use crate::diagnostics::DiagnosticEvent;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::DiagnosticSink;
use crate::runtime::condition::evaluate_condition;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Visibility when no rule is declared.
pub const DEFAULT_VISIBLE: bool = true;
/// Disablement when no rule is declared.
pub const DEFAULT_DISABLED: bool = false;

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

/// Evaluates an optional rule, returning `default_when_absent` for missing or
/// empty rules.
pub fn evaluate_rule(
    rule: Option<&Rule>,
    data: &Value,
    default_when_absent: bool,
    diagnostics: &dyn DiagnosticSink,
) -> bool {
    let Some(rule) = rule else {
        return default_when_absent;
    };
    if rule.conditions.is_empty() {
        return default_when_absent;
    }

    match rule.logic {
        RuleLogic::Or => {
            for condition in &rule.conditions {
                if evaluate_condition(condition, data, diagnostics) {
                    return true;
                }
            }
            false
        }
        RuleLogic::And | RuleLogic::Unknown => {
            if rule.logic == RuleLogic::Unknown {
                diagnostics.record(&DiagnosticEvent::new(
                    DiagnosticKind::UnknownLogic,
                    "unknown rule logic; evaluated as and",
                ));
            }
            for condition in &rule.conditions {
                if !evaluate_condition(condition, data, diagnostics) {
                    return false;
                }
            }
            true
        }
    }
}

/// Evaluates a visibility rule (defaults to visible).
pub fn is_visible(rule: Option<&Rule>, data: &Value, diagnostics: &dyn DiagnosticSink) -> bool {
    evaluate_rule(rule, data, DEFAULT_VISIBLE, diagnostics)
}

/// Evaluates a section disablement rule (defaults to enabled).
pub fn is_section_disabled(
    rule: Option<&Rule>,
    data: &Value,
    diagnostics: &dyn DiagnosticSink,
) -> bool {
    evaluate_rule(rule, data, DEFAULT_DISABLED, diagnostics)
}

/// Computes a field's effective disabled state.
///
/// A disabled section always wins; the field rule is not consulted.
pub fn is_field_disabled(
    section_disabled: bool,
    field_rule: Option<&Rule>,
    data: &Value,
    diagnostics: &dyn DiagnosticSink,
) -> bool {
    section_disabled || evaluate_rule(field_rule, data, DEFAULT_DISABLED, diagnostics)
}
