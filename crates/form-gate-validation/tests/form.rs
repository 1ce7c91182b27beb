// crates/form-gate-validation/tests/form.rs
// ============================================================================
// Module: Form Validation Tests
// Description: Whole-form validation, path remapping, and message rendering.
// ============================================================================
//! ## Overview
//! Validates required-field remapping, keyword messages, empty-value policy,
//! error propagation for malformed schemas, and field validator caching.

mod support;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use form_gate_core::CompileError;
use form_gate_core::CompiledSchema;
use form_gate_core::FormSchema;
use form_gate_core::MemoryDiagnosticSink;
use form_gate_core::ROOT_PATH;
use form_gate_core::SchemaCompiler;
use form_gate_core::SchemaViolation;
use form_gate_validation::FormValidationError;
use form_gate_validation::FormValidator;
use form_gate_validation::JsonSchemaCompiler;
use form_gate_validation::ValidationOptions;
use form_gate_validation::validate_form;
use serde_json::Value;
use serde_json::json;
use support::TestResult;
use support::ensure;
use support::grant_schema;

/// Returns valid grant data.
fn valid_data() -> Value {
    json!({
        "applicant": { "name": "Jane Doe", "email": "jane@example.com", "code": "1234" },
        "budget": { "amount": 5000, "units": 10, "tier": "silver" }
    })
}

// ============================================================================
// SECTION: Required Remapping
// ============================================================================

#[test]
fn required_failure_is_keyed_at_missing_field() -> TestResult {
    let schema = FormSchema::from_value(json!({
        "sections": [
            { "id": "s", "properties": { "f": { "type": "string", "required": true } } }
        ]
    }))?;
    let result = validate_form(&schema, &json!({ "s": {} }), &ValidationOptions::default())?;
    ensure(!result.valid, "empty data is invalid")?;
    ensure(!result.errors.contains("s"), "error not keyed at section")?;
    ensure(!result.errors.contains(ROOT_PATH), "error not keyed at root")?;
    let messages = result.errors.get("s.f").ok_or("missing s.f errors")?;
    ensure(messages.iter().any(|m| m.ends_with("is required")), "required message")?;
    ensure(messages == ["f is required"], "label falls back to key")?;
    Ok(())
}

#[test]
fn required_uses_title_and_treats_empty_values_as_missing() -> TestResult {
    let validator = FormValidator::new(grant_schema()?, ValidationOptions::default())?;
    let mut data = valid_data();
    data["applicant"]["name"] = json!("");
    data["budget"]["amount"] = Value::Null;
    let result = validator.validate(&data);
    ensure(result.errors.get("applicant.name") == Some(&["Full name is required".to_string()][..]), "name")?;
    ensure(result.errors.get("budget.amount") == Some(&["Amount is required".to_string()][..]), "amount")?;
    ensure(result.errors.len() == 2, "only the two missing fields fail")?;
    Ok(())
}

#[test]
fn valid_data_passes() -> TestResult {
    let result = validate_form(&grant_schema()?, &valid_data(), &ValidationOptions::default())?;
    ensure(result.valid, "valid data")?;
    ensure(result.errors.is_empty(), "no errors")?;
    Ok(())
}

#[test]
fn missing_sections_report_required_fields() -> TestResult {
    let result = validate_form(&grant_schema()?, &json!({}), &ValidationOptions::default())?;
    let paths: Vec<&str> = result.errors.paths().collect();
    ensure(paths == ["applicant.name", "budget.amount"], format!("paths {paths:?}"))?;
    Ok(())
}

// ============================================================================
// SECTION: Keyword Messages
// ============================================================================

#[test]
fn keyword_messages_are_humanized() -> TestResult {
    let validator = FormValidator::new(grant_schema()?, ValidationOptions::default())?;
    let data = json!({
        "applicant": { "name": "Jane 2", "email": "not-an-email", "code": "12" },
        "budget": { "amount": 10, "units": 20000, "tier": "gold" }
    });
    let result = validator.validate(&data);
    let expect = |path: &str, message: &str| -> TestResult {
        let found = result.errors.get(path).unwrap_or_default();
        ensure(found.iter().any(|m| m == message), format!("{path}: expected {message:?}, got {found:?}"))
    };
    expect("applicant.name", "Letters and spaces only")?;
    expect("applicant.email", "Invalid email format")?;
    expect("applicant.code", "Invalid format")?;
    expect("budget.amount", "Value must be at least 1,000")?;
    expect("budget.units", "Value must be at most 10000")?;
    expect("budget.tier", "Value must be one of: bronze, silver")?;
    Ok(())
}

#[test]
fn messages_for_one_path_keep_report_order() -> TestResult {
    let schema = FormSchema::from_value(json!({
        "sections": [{
            "id": "s",
            "properties": {
                "code": {
                    "type": "string",
                    "pattern": "^[a-z]+$",
                    "validationMessage": "lower only",
                    "minLength": 5
                }
            }
        }]
    }))?;
    let result = validate_form(&schema, &json!({ "s": { "code": "A1" } }), &ValidationOptions::default())?;
    let messages = result.errors.get("s.code").ok_or("missing s.code errors")?;
    ensure(
        messages == ["lower only", "\"A1\" is shorter than 5 characters"],
        format!("ordered messages {messages:?}"),
    )?;
    ensure(result.errors.len() == 1, "both failures share one path")?;
    Ok(())
}

#[test]
fn maximum_limit_is_grouped_by_default() -> TestResult {
    let validator = FormValidator::new(grant_schema()?, ValidationOptions::default())?;
    let mut data = valid_data();
    data["budget"]["amount"] = json!(2_000_000);
    let result = validator.validate(&data);
    ensure(
        result.errors.get("budget.amount") == Some(&["Value must be at most 1,000,000".to_string()][..]),
        "grouped maximum",
    )
}

#[test]
fn grouping_can_be_disabled_globally() -> TestResult {
    let options = ValidationOptions {
        group_digits: false,
        ..ValidationOptions::default()
    };
    let mut data = valid_data();
    data["budget"]["amount"] = json!(1);
    let result = validate_form(&grant_schema()?, &data, &options)?;
    ensure(
        result.errors.get("budget.amount") == Some(&["Value must be at least 1000".to_string()][..]),
        "ungrouped minimum",
    )
}

#[test]
fn type_mismatch_is_reported_at_field() -> TestResult {
    let mut data = valid_data();
    data["budget"]["amount"] = json!("lots");
    let result = validate_form(&grant_schema()?, &data, &ValidationOptions::default())?;
    ensure(
        result.errors.get("budget.amount") == Some(&["Value must be a integer".to_string()][..]),
        "type message",
    )
}

#[test]
fn undeclared_data_is_ignored() -> TestResult {
    let mut data = valid_data();
    data["applicant"]["extra"] = json!(42);
    data["other"] = json!({ "x": 1 });
    let result = validate_form(&grant_schema()?, &data, &ValidationOptions::default())?;
    ensure(result.valid, "undeclared keys do not fail validation")
}

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

#[test]
fn malformed_schema_is_returned_as_error() -> TestResult {
    let schema = FormSchema::from_value(json!({
        "sections": [
            { "id": "s", "properties": { "f": { "type": "string", "pattern": "(" } } }
        ]
    }))?;
    let result = validate_form(&schema, &json!({}), &ValidationOptions::default());
    ensure(matches!(result, Err(FormValidationError::Compile(_))), "compile error propagates")
}

/// Compiler that reports one violation per instance at a fixed location.
struct FixedCompiler {
    violation: SchemaViolation,
}

struct FixedSchema {
    violation: SchemaViolation,
}

impl CompiledSchema for FixedSchema {
    fn validate(&self, _instance: &Value) -> Vec<SchemaViolation> {
        vec![self.violation.clone()]
    }
}

impl SchemaCompiler for FixedCompiler {
    fn compile(&self, _schema: &Value) -> Result<Box<dyn CompiledSchema>, CompileError> {
        Ok(Box::new(FixedSchema {
            violation: self.violation.clone(),
        }))
    }
}

#[test]
fn pathless_violations_land_on_root_with_raw_message() -> TestResult {
    let compiler = FixedCompiler {
        violation: SchemaViolation {
            instance_path: Vec::new(),
            keyword: "minProperties".to_string(),
            message: "object has too few properties".to_string(),
            params: json!({}),
        },
    };
    let validator = FormValidator::with_compiler(
        grant_schema()?,
        ValidationOptions::default(),
        Box::new(compiler),
    )?;
    let result = validator.validate(&valid_data());
    ensure(
        result.errors.get(ROOT_PATH) == Some(&["object has too few properties".to_string()][..]),
        "root message",
    )
}

#[test]
fn pattern_on_unresolvable_path_uses_generic_message() -> TestResult {
    let compiler = FixedCompiler {
        violation: SchemaViolation {
            instance_path: vec!["missing.path".to_string()],
            keyword: "pattern".to_string(),
            message: "does not match".to_string(),
            params: json!({ "pattern": "x" }),
        },
    };
    let validator = FormValidator::with_compiler(
        grant_schema()?,
        ValidationOptions::default(),
        Box::new(compiler),
    )?;
    let result = validator.validate(&valid_data());
    ensure(
        result.errors.get("missing.path") == Some(&["Invalid format".to_string()][..]),
        "fallback message",
    )
}

// ============================================================================
// SECTION: Field Validator Cache
// ============================================================================

#[test]
fn validator_field_checks_are_cached_and_bounded() -> TestResult {
    let options = ValidationOptions {
        max_cached_validators: 2,
        ..ValidationOptions::default()
    };
    let validator = FormValidator::new(grant_schema()?, options)?;
    let sink = MemoryDiagnosticSink::new();
    let low = validator.validate_field("budget.amount", Some(&json!(5)), &sink);
    ensure(low == ["Value must be at least 1,000"], format!("amount messages {low:?}"))?;
    let ok = validator.validate_field("budget.amount", Some(&json!(5000)), &sink);
    ensure(ok.is_empty(), "cached validator accepts valid value")?;
    ensure(validator.cached_field_validators() == 1, "one cached validator")?;
    let _ = validator.validate_field("budget.units", Some(&json!(1)), &sink);
    let _ = validator.validate_field("budget.tier", Some(&json!("gold")), &sink);
    ensure(validator.cached_field_validators() == 2, "cache stays bounded")?;
    let unknown = validator.validate_field("budget.nothing", Some(&json!(1)), &sink);
    ensure(unknown.is_empty(), "unknown path yields nothing")?;
    ensure(sink.events().is_empty(), "no diagnostics for valid field schemas")?;
    Ok(())
}

/// Compiler that counts compilations before delegating to the default engine.
struct CountingCompiler {
    /// Engine doing the real work.
    inner: JsonSchemaCompiler,
    /// Number of compilations so far.
    compiles: Arc<AtomicUsize>,
}

impl SchemaCompiler for CountingCompiler {
    fn compile(&self, schema: &Value) -> Result<Box<dyn CompiledSchema>, CompileError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(schema)
    }
}

#[test]
fn cache_evicts_least_recently_used_validator() -> TestResult {
    let compiles = Arc::new(AtomicUsize::new(0));
    let options = ValidationOptions {
        max_cached_validators: 2,
        ..ValidationOptions::default()
    };
    let compiler = CountingCompiler {
        inner: JsonSchemaCompiler::from_options(&options),
        compiles: Arc::clone(&compiles),
    };
    let validator = FormValidator::with_compiler(grant_schema()?, options, Box::new(compiler))?;
    ensure(compiles.load(Ordering::SeqCst) == 1, "form schema compiled once")?;

    let sink = MemoryDiagnosticSink::new();
    let _ = validator.validate_field("budget.amount", Some(&json!(5000)), &sink);
    let _ = validator.validate_field("budget.units", Some(&json!(1)), &sink);
    let _ = validator.validate_field("budget.amount", Some(&json!(5000)), &sink);
    ensure(compiles.load(Ordering::SeqCst) == 3, "repeat lookup hits the cache")?;

    let _ = validator.validate_field("budget.tier", Some(&json!("gold")), &sink);
    ensure(compiles.load(Ordering::SeqCst) == 4, "new path compiles")?;
    let _ = validator.validate_field("budget.amount", Some(&json!(5000)), &sink);
    ensure(compiles.load(Ordering::SeqCst) == 4, "recently used validator survived eviction")?;
    let _ = validator.validate_field("budget.units", Some(&json!(1)), &sink);
    ensure(compiles.load(Ordering::SeqCst) == 5, "least recently used validator was evicted")?;
    ensure(validator.cached_field_validators() == 2, "cache stays bounded")?;
    Ok(())
}
