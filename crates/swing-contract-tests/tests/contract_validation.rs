//! Validates analysis result fixtures and generated results against frozen
//! JSON schemas.

use jsonschema::JSONSchema;
use serde_json::Value;
use swing_analysis_contract::normalize_analysis_payload;
use swing_demo::generate_fallback;

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

fn result_validator() -> JSONSchema {
    compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-result.schema.json"
    ))
}

#[test]
fn result_fixture_matches_schema() {
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analysis-result.valid.json"
    ));
    assert!(
        result_validator().is_valid(&fixture),
        "result fixture should validate against schema"
    );
}

#[test]
fn normalized_backend_fixtures_match_schema() {
    let validator = result_validator();
    for path in [
        concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../contracts/fixtures/backend-response.aliased.json"
        ),
        concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../contracts/fixtures/backend-response.sparse.json"
        ),
    ] {
        let result =
            normalize_analysis_payload(&load_json(path)).expect("fixture should normalize");
        let encoded = serde_json::to_value(&result).expect("result should encode");
        assert!(
            validator.is_valid(&encoded),
            "normalized {path} should validate against schema"
        );
    }
}

#[test]
fn sparse_backend_fixture_normalizes_to_defaults() {
    let payload = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/backend-response.sparse.json"
    ));
    let encoded = serde_json::to_value(
        normalize_analysis_payload(&payload).expect("fixture should normalize"),
    )
    .expect("result should encode");

    assert_eq!(encoded["direction"], "neutral");
    assert_eq!(encoded["angle"], Value::Null);
    assert_eq!(encoded["speed"], Value::Null);
    assert_eq!(encoded["feedback"], r#"{"tempo":"fast"}"#);
    assert_eq!(encoded["source"], "backend");
}

#[test]
fn fallback_results_match_both_schemas() {
    let general = result_validator();
    let demo = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/demo-result.schema.json"
    ));

    for name in ["", "demo", "clip_forehand_01.mp4", "café.mov", "🎾 serve.mp4"] {
        let encoded =
            serde_json::to_value(generate_fallback(name)).expect("result should encode");
        assert!(general.is_valid(&encoded), "fallback for {name:?} should be a result");
        assert!(demo.is_valid(&encoded), "fallback for {name:?} should stay in demo bounds");
    }
}

#[test]
fn aliased_backend_fixture_resolves_alternate_keys() {
    let payload = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/backend-response.aliased.json"
    ));
    let encoded = serde_json::to_value(
        normalize_analysis_payload(&payload).expect("fixture should normalize"),
    )
    .expect("result should encode");

    assert_eq!(encoded["direction"], "forehand");
    assert_eq!(encoded["angle"], 28.4);
    assert_eq!(encoded["speed"], 81.0);
    assert_eq!(encoded["feedback"], "Early preparation, solid follow-through.");
}
