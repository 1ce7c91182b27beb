// crates/form-gate-core/src/core/rule.rs
// ============================================================================
// Module: Form Gate Rule Types
// Description: Visibility/disablement rules and their conditions.
// Purpose: Define the serializable predicate vocabulary used by form rules.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A rule is an ordered list of conditions combined with `and`/`or` logic.
//! Rules are parsed leniently and never fail to deserialize:
//! - an unknown, non-string, or missing operator becomes
//!   [`ConditionOperator::Unknown`];
//! - unknown or non-string logic becomes [`RuleLogic::Unknown`], and missing
//!   logic is `and`;
//! - a non-string field path becomes the empty path, which resolves to absent;
//! - non-array `conditions` and non-object rules have no conditions.
//!
//! Evaluation then degrades to a safe default and reports a diagnostic
//! instead of rejecting the whole schema. A missing `value` is kept distinct
//! from an explicit `null` operand.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Condition set controlling visibility or disablement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Rule {
    /// Conditions in declaration order.
    pub conditions: Vec<Condition>,
    /// Combination mode.
    pub logic: RuleLogic,
}

impl Rule {
    /// Creates a rule requiring every condition.
    #[must_use]
    pub const fn all(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logic: RuleLogic::And,
        }
    }

    /// Creates a rule requiring at least one condition.
    #[must_use]
    pub const fn any(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logic: RuleLogic::Or,
        }
    }
}

impl From<Value> for Rule {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let conditions = match map.remove("conditions") {
            Some(Value::Array(items)) => items.into_iter().map(Condition::from).collect(),
            _ => Vec::new(),
        };
        let logic = map.remove("logic").map_or(RuleLogic::And, RuleLogic::from);
        Self {
            conditions,
            logic,
        }
    }
}

/// Combination mode for rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum RuleLogic {
    /// Every condition must hold.
    #[default]
    And,
    /// At least one condition must hold.
    Or,
    /// Unrecognized mode; evaluated as `And`.
    Unknown,
}

impl From<Value> for RuleLogic {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("and") => Self::And,
            Some("or") => Self::Or,
            _ => Self::Unknown,
        }
    }
}

// ============================================================================
// SECTION: Conditions
// ============================================================================

/// Single comparison between a referenced field and a literal operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Condition {
    /// Dot-path of the referenced field (for example `section.field`).
    pub field: String,
    /// Comparison operator.
    pub operator: ConditionOperator,
    /// Comparison operand; `None` when the condition declares no `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Condition {
    /// Creates a condition with an operand.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value),
        }
    }

    /// Creates a condition without an operand (`exists`/`not_exists`).
    #[must_use]
    pub fn unary(field: impl Into<String>, operator: ConditionOperator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
        }
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::unary(String::new(), ConditionOperator::Unknown(value.to_string()));
        };
        let field = match map.remove("field") {
            Some(Value::String(path)) => path,
            _ => String::new(),
        };
        let operator = ConditionOperator::from(map.remove("operator").unwrap_or(Value::Null));
        Self {
            field,
            operator,
            value: map.remove("value"),
        }
    }
}

/// Comparison operator applied to a resolved field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum ConditionOperator {
    /// Strict equality.
    Equals,
    /// Strict inequality.
    NotEquals,
    /// Membership in an operand array.
    In,
    /// Non-membership in an operand array.
    NotIn,
    /// Numeric greater-than.
    GreaterThan,
    /// Numeric less-than.
    LessThan,
    /// Value is present and non-empty.
    Exists,
    /// Value is absent, null, or empty.
    NotExists,
    /// Unrecognized operator, kept as its JSON text for diagnostics.
    Unknown(String),
}

impl ConditionOperator {
    /// Returns the canonical operator label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Exists => "exists",
            Self::NotExists => "not_exists",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            "exists" => Self::Exists,
            "not_exists" => Self::NotExists,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Value> for ConditionOperator {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::from(name),
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<&str> for ConditionOperator {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ConditionOperator> for String {
    fn from(value: ConditionOperator) -> Self {
        match value {
            ConditionOperator::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
