//! Integration tests for backend payload normalization.

use serde_json::json;
use swing_analysis_contract::{
    AnalysisContractError, normalize_analysis_payload, parse_analysis_response,
};
use swing_core::{ResultSource, SwingDirection};

#[test]
fn normalize_payload_tests_prefers_primary_direction_key() {
    let payload = json!({ "direction": "backhand", "swing_direction": "forehand" });
    let result = normalize_analysis_payload(&payload).expect("object payload should normalize");
    assert_eq!(result.direction, SwingDirection::Backhand);
}

#[test]
fn normalize_payload_tests_falls_through_null_keys_in_order() {
    let payload = json!({
        "speed": null,
        "swing_speed": null,
        "velocity": "88",
        "mph": 12,
    });
    let result = normalize_analysis_payload(&payload).expect("object payload should normalize");
    assert_eq!(result.speed, Some(88.0));
}

#[test]
fn normalize_payload_tests_coerces_numeric_strings() {
    let parsed = normalize_analysis_payload(&json!({ "angle": "12.5" })).expect("normalize");
    assert_eq!(parsed.angle, Some(12.5));

    let garbage = normalize_analysis_payload(&json!({ "angle": "not-a-number" })).expect("normalize");
    assert_eq!(garbage.angle, None);

    let nan = normalize_analysis_payload(&json!({ "angle": "NaN" })).expect("normalize");
    assert_eq!(nan.angle, None);

    let nested = normalize_analysis_payload(&json!({ "deg": [30] })).expect("normalize");
    assert_eq!(nested.angle, None);
}

#[test]
fn normalize_payload_tests_maps_direction_labels() {
    let cases = [
        (json!("Forehand-Topspin"), SwingDirection::Forehand),
        (json!("BACKHAND slice"), SwingDirection::Backhand),
        (json!(""), SwingDirection::Neutral),
        (json!("  Neutral stance "), SwingDirection::Neutral),
        (
            json!("  cross-court "),
            SwingDirection::Other("cross-court".to_string()),
        ),
        (json!("Overhead"), SwingDirection::Other("Overhead".to_string())),
    ];

    for (raw, expected) in cases {
        let result = normalize_analysis_payload(&json!({ "direction": raw }))
            .expect("object payload should normalize");
        assert_eq!(result.direction, expected);
    }
}

#[test]
fn normalize_payload_tests_defaults_missing_fields() {
    let result = normalize_analysis_payload(&json!({})).expect("empty object should normalize");
    assert_eq!(result.direction, SwingDirection::Neutral);
    assert_eq!(result.angle, None);
    assert_eq!(result.speed, None);
    assert_eq!(result.feedback, "");
    assert_eq!(result.source, ResultSource::Backend);
}

#[test]
fn normalize_payload_tests_stringifies_feedback() {
    let text = normalize_analysis_payload(&json!({ "notes": "Relax the grip" })).expect("normalize");
    assert_eq!(text.feedback, "Relax the grip");

    let number = normalize_analysis_payload(&json!({ "comment": 3 })).expect("normalize");
    assert_eq!(number.feedback, "3");

    let structured =
        normalize_analysis_payload(&json!({ "validation": { "ok": true } })).expect("normalize");
    assert_eq!(structured.feedback, r#"{"ok":true}"#);
}

#[test]
fn normalize_payload_tests_rejects_non_object_payloads() {
    for payload in [json!(null), json!("string"), json!(42), json!(true), json!([1, 2])] {
        let error = normalize_analysis_payload(&payload).expect_err("non-object must fail");
        assert!(matches!(error, AnalysisContractError::InvalidPayload { .. }));
    }
}

#[test]
fn normalize_payload_tests_handles_alternate_backend_shape() {
    let raw = br#"{ "swingSpeed": "72", "swing_type": "backhand", "message": "Good extension" }"#;
    let result = parse_analysis_response(raw).expect("payload should parse");

    assert_eq!(result.direction, SwingDirection::Backhand);
    assert_eq!(result.angle, None);
    assert_eq!(result.speed, Some(72.0));
    assert_eq!(result.feedback, "Good extension");
    assert_eq!(result.source, ResultSource::Backend);
}

#[test]
fn normalize_payload_tests_reports_undecodable_bytes() {
    let error = parse_analysis_response(b"<html>502</html>").expect_err("html is not json");
    assert!(matches!(error, AnalysisContractError::Decode(_)));
}

#[test]
fn normalize_payload_tests_keeps_falsy_feedback_as_text() {
    let zero = normalize_analysis_payload(&json!({ "feedback": 0 })).expect("normalize");
    assert_eq!(zero.feedback, "0");

    let flag = normalize_analysis_payload(&json!({ "message": false })).expect("normalize");
    assert_eq!(flag.feedback, "false");

    let empty = normalize_analysis_payload(&json!({ "feedback": "", "message": "ignored" }))
        .expect("normalize");
    assert_eq!(empty.feedback, "");
}
