// crates/form-gate-validation/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and schema fixtures for validation tests.
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

/// Standard result type used across validation integration tests.
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

/// Grant application form exercising every humanized keyword.
pub fn grant_schema() -> TestResult<FormSchema> {
    let schema = FormSchema::from_value(json!({
        "title": "Grant application",
        "sections": [
            {
                "id": "applicant",
                "properties": {
                    "name": {
                        "type": "string",
                        "title": "Full name",
                        "required": true,
                        "pattern": "^[A-Za-z ]+$",
                        "validationMessage": "Letters and spaces only",
                        "ui:placeholder": "Jane Doe"
                    },
                    "email": { "type": "string", "format": "email", "ui:widget": "email" },
                    "code": { "type": "string", "pattern": "^[0-9]{4}$" }
                }
            },
            {
                "id": "budget",
                "ui:disabled": {
                    "conditions": [
                        { "field": "applicant.name", "operator": "not_exists" }
                    ]
                },
                "properties": {
                    "amount": {
                        "type": "integer",
                        "title": "Amount",
                        "required": true,
                        "minimum": 1000,
                        "maximum": 1000000
                    },
                    "units": { "type": "integer", "maximum": 10000, "ui:groupDigits": false },
                    "tier": { "type": "string", "enum": ["bronze", "silver"] }
                }
            }
        ]
    }))?;
    Ok(schema)
}
