// crates/form-gate-core/tests/schema.rs
// ============================================================================
// Module: Schema Model Tests
// Description: Parsing, invariants, ordering, and path helpers.
// ============================================================================
//! ## Overview
//! Validates schema loading invariants, lenient rule loading, field order
//! preservation, pass-through keys, and dot-path lookup/update.

mod support;

use form_gate_core::DiagnosticKind;
use form_gate_core::FieldType;
use form_gate_core::FormSchema;
use form_gate_core::MemoryDiagnosticSink;
use form_gate_core::PathError;
use form_gate_core::SchemaError;
use form_gate_core::compute_form_state;
use form_gate_core::get_path;
use form_gate_core::set_path;
use serde_json::json;
use support::TestResult;
use support::ensure;

#[test]
fn field_order_and_unknown_keys_are_preserved() -> TestResult {
    let schema = FormSchema::from_json_str(
        r#"{"sections":[{"id":"s","properties":{
            "zeta":{"type":"string","minLength":2},
            "alpha":{"type":"number"},
            "mid":{"type":"boolean"}}}]}"#,
    )?;
    let section = schema.section("s").ok_or("section missing")?;
    let keys: Vec<&str> = section.properties.keys().map(String::as_str).collect();
    ensure(keys == vec!["zeta", "alpha", "mid"], "declaration order kept")?;
    let (_, zeta) = schema.field("s.zeta").ok_or("zeta missing")?;
    ensure(zeta.extra.get("minLength") == Some(&json!(2)), "unknown key passed through")?;
    ensure(zeta.field_type == FieldType::String, "type parsed")?;

    let round_trip = serde_json::to_value(&schema)?;
    let keys: Vec<&String> = round_trip["sections"][0]["properties"]
        .as_object()
        .ok_or("properties not an object")?
        .keys()
        .collect();
    ensure(keys == vec!["zeta", "alpha", "mid"], "serialization keeps order")?;
    Ok(())
}

#[test]
fn duplicate_and_dotted_section_ids_are_rejected() -> TestResult {
    let duplicate = FormSchema::from_value(json!({
        "sections": [{ "id": "a", "properties": {} }, { "id": "a", "properties": {} }]
    }));
    ensure(duplicate == Err(SchemaError::DuplicateSection("a".to_string())), "duplicate")?;
    let dotted = FormSchema::from_value(json!({ "sections": [{ "id": "a.b" }] }));
    ensure(dotted == Err(SchemaError::InvalidSectionId("a.b".to_string())), "dotted id")?;
    let empty = FormSchema::from_value(json!({ "sections": [{ "id": " " }] }));
    ensure(empty == Err(SchemaError::EmptySectionId), "empty id")?;
    Ok(())
}

#[test]
fn malformed_rules_load_and_degrade_to_defaults() -> TestResult {
    let schema = FormSchema::from_value(json!({
        "sections": [{
            "id": "a",
            "ui:disabled": { "logic": null, "conditions": [{ "field": "a.g", "operator": 7 }] },
            "properties": {
                "g": { "type": "string" },
                "f": {
                    "type": "string",
                    "ui:show": { "conditions": [{ "field": "", "value": 1 }] }
                }
            }
        }]
    }))?;
    let sink = MemoryDiagnosticSink::new();
    let state = compute_form_state(&schema, &json!({}), &sink);
    let field = state.field("a.f").ok_or("field missing")?;
    ensure(field.visible, "missing operator keeps the field visible")?;
    let section = state.section("a").ok_or("section missing")?;
    ensure(section.disabled, "null logic with a satisfied condition evaluates as and")?;
    let kinds = sink.kinds();
    ensure(kinds.contains(&DiagnosticKind::UnknownOperator), "operator diagnostic recorded")?;
    ensure(kinds.contains(&DiagnosticKind::UnknownLogic), "logic diagnostic recorded")?;
    Ok(())
}

#[test]
fn unsupported_field_type_is_a_parse_error() -> TestResult {
    let result = FormSchema::from_value(json!({
        "sections": [{ "id": "a", "properties": { "f": { "type": "object" } } }]
    }));
    ensure(matches!(result, Err(SchemaError::Parse(_))), "object type rejected")?;
    Ok(())
}

#[test]
fn field_lookup_misses_return_none() -> TestResult {
    let schema = support::project_schema()?;
    ensure(schema.field("projectInfo.projectType").is_some(), "hit")?;
    ensure(schema.field("projectInfo.nope").is_none(), "missing key")?;
    ensure(schema.field("nope.projectType").is_none(), "missing section")?;
    ensure(schema.field("projectInfo").is_none(), "no field segment")?;
    Ok(())
}

#[test]
fn get_path_walks_objects_and_arrays() -> TestResult {
    let data = json!({ "a": { "b": [10, { "c": "x" }] } });
    ensure(get_path(&data, "a.b.0") == Some(&json!(10)), "array index")?;
    ensure(get_path(&data, "a.b.1.c") == Some(&json!("x")), "nested object in array")?;
    ensure(get_path(&data, "a.b.9").is_none(), "index out of range")?;
    ensure(get_path(&data, "a.b.0.deeper").is_none(), "scalar has no children")?;
    ensure(get_path(&data, "missing.path").is_none(), "missing key")?;
    Ok(())
}

#[test]
fn set_path_creates_intermediate_objects() -> TestResult {
    let mut data = json!({ "a": { "keep": true } });
    set_path(&mut data, "a.b.c", json!(3))?;
    ensure(data == json!({ "a": { "keep": true, "b": { "c": 3 } } }), "intermediates created")?;
    let mut scalar = json!({ "a": 1 });
    ensure(
        set_path(&mut scalar, "a.b", json!(2)) == Err(PathError::NotAnObject("a".to_string())),
        "scalar not overwritten",
    )?;
    ensure(set_path(&mut scalar, "", json!(2)) == Err(PathError::Empty), "empty path")?;
    Ok(())
}
