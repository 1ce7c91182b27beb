// crates/form-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and schema fixtures for core tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;

use form_gate_core::FormSchema;
use serde_json::json;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl TestError {
    /// Creates a new test error with the provided message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(Box::new(TestError::new(message))) }
}

// ========================================================================
// Schema Fixtures
// ========================================================================

/// Project intake form with a dependent details field and a dynamic enum.
pub fn project_schema() -> TestResult<FormSchema> {
    let schema = FormSchema::from_value(json!({
        "title": "Project intake",
        "sections": [
            {
                "id": "projectInfo",
                "title": "Project",
                "properties": {
                    "projectType": {
                        "type": "string",
                        "title": "Project type",
                        "required": true,
                        "enum": ["option1", "option2", "option3"],
                        "enumNames": ["Option 1", "Option 2", "Option 3"]
                    },
                    "details": {
                        "type": "string",
                        "ui:widget": "textarea",
                        "ui:show": {
                            "conditions": [
                                {
                                    "field": "projectInfo.projectType",
                                    "operator": "in",
                                    "value": ["option2", "option3"]
                                }
                            ]
                        }
                    },
                    "region": {
                        "type": "string",
                        "enum": ["global"],
                        "ui:enumSource": {
                            "field": "projectInfo.projectType",
                            "mapping": {
                                "option1": { "enum": ["eu", "us"], "enumNames": ["Europe"] }
                            }
                        }
                    }
                }
            },
            {
                "id": "budget",
                "title": "Budget",
                "ui:disabled": {
                    "conditions": [
                        { "field": "projectInfo.projectType", "operator": "equals", "value": "option1" }
                    ]
                },
                "properties": {
                    "amount": { "type": "integer", "minimum": 1000 },
                    "approved": {
                        "type": "boolean",
                        "ui:widget": "radio",
                        "ui:disabled": {
                            "conditions": [
                                { "field": "budget.amount", "operator": "greater_than", "value": 5000 }
                            ]
                        }
                    }
                }
            }
        ]
    }))?;
    Ok(schema)
}
