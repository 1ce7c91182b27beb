// crates/form-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and bounded input reads.
// Purpose: Ensure CLI helpers fail closed on malformed or oversized inputs.
// Dependencies: form-gate-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates `--set` parsing, override application, and the input size limit.

#![allow(
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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use clap::CommandFactory;
use serde_json::json;

use super::Cli;
use super::ReadLimitError;
use super::apply_assignments;
use super::parse_assignment;
use super::parse_json_value;
use super::read_bytes_with_limit;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_assignment_reads_json_values() {
    let assignment = parse_assignment("budget.amount=5000").expect("parse");
    assert_eq!(assignment.path, "budget.amount");
    assert_eq!(assignment.value, json!(5000));
    let quoted = parse_assignment("info.name=\"Ada\"").expect("parse quoted");
    assert_eq!(quoted.value, json!("Ada"));
}

#[test]
fn parse_assignment_falls_back_to_strings() {
    let assignment = parse_assignment("info.kind=option2").expect("parse");
    assert_eq!(assignment.value, json!("option2"));
    let with_equals = parse_assignment("info.expr=a=b").expect("parse");
    assert_eq!(with_equals.value, json!("a=b"));
}

#[test]
fn parse_assignment_rejects_missing_path() {
    assert!(parse_assignment("no-separator").is_err());
    assert!(parse_assignment(" =1").is_err());
}

#[test]
fn parse_json_value_is_strict() {
    assert_eq!(parse_json_value("[1, 2]").expect("array"), json!([1, 2]));
    assert!(parse_json_value("option2").is_err());
}

#[test]
fn assignments_create_sections_in_order() {
    let mut data = json!({ "info": { "kind": "option1" } });
    let assignments = vec![
        parse_assignment("info.kind=option2").expect("first"),
        parse_assignment("budget.amount=10").expect("second"),
        parse_assignment("budget.amount=20").expect("third"),
    ];
    apply_assignments(&mut data, &assignments).expect("apply");
    assert_eq!(data, json!({ "info": { "kind": "option2" }, "budget": { "amount": 20 } }));
}

#[test]
fn assignments_reject_non_object_parents() {
    let mut data = json!({ "info": "flat" });
    let assignments = vec![parse_assignment("info.kind=1").expect("parse")];
    let err = apply_assignments(&mut data, &assignments).expect_err("non-object parent");
    assert!(err.to_string().contains("info.kind"));
}

#[test]
fn read_bytes_with_limit_enforces_size() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("input.json");
    fs::write(&path, b"0123456789").expect("write");
    assert_eq!(read_bytes_with_limit(&path, 10).expect("at limit").len(), 10);
    match read_bytes_with_limit(&path, 9) {
        Err(ReadLimitError::TooLarge {
            size,
            limit,
        }) => {
            assert_eq!(size, 10);
            assert_eq!(limit, 9);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = read_bytes_with_limit(&dir.path().join("absent.json"), 10);
    assert!(matches!(result, Err(ReadLimitError::Io(_))));
}
