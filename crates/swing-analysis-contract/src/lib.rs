#![warn(missing_docs)]
//! # swing-analysis-contract
//!
//! ## Purpose
//! Maps loosely-shaped analysis service responses onto the canonical
//! [`AnalysisResult`].
//!
//! ## Responsibilities
//! - Resolve each canonical field from an ordered list of accepted key names.
//! - Normalize direction labels and coerce numeric and feedback values.
//! - Reject payloads that are not key/value records.
//!
//! ## Data flow
//! Raw response bytes -> [`parse_analysis_response`] ->
//! [`normalize_analysis_payload`] -> [`AnalysisResult`] tagged
//! [`ResultSource::Backend`].
//!
//! ## Ownership and lifetimes
//! The normalized result copies what it needs out of the payload, so the
//! decoded JSON can be dropped right after normalization.
//!
//! ## Error model
//! Only a non-object payload (or undecodable bytes) fails. Field-level problems
//! degrade to defaults: `Neutral` direction, unknown numbers, empty feedback.

use serde_json::{Map, Value};
use swing_core::{AnalysisResult, ResultSource, SwingDirection};
use thiserror::Error;
use tracing::debug;

/// Canonical result fields resolved from backend payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    /// Swing direction label.
    Direction,
    /// Swing angle in degrees.
    Angle,
    /// Swing speed magnitude.
    Speed,
    /// Free-form feedback text.
    Feedback,
}

/// Accepted payload keys per canonical field, in priority order.
pub const FIELD_KEYS: [(CanonicalField, &[&str]); 4] = [
    (
        CanonicalField::Direction,
        &[
            "direction",
            "swing_direction",
            "swingDirection",
            "swing_type",
            "swingType",
        ],
    ),
    (
        CanonicalField::Angle,
        &["angle", "swing_angle", "swingAngle", "degrees", "deg"],
    ),
    (
        CanonicalField::Speed,
        &["speed", "swing_speed", "swingSpeed", "velocity", "mph", "kph"],
    ),
    (
        CanonicalField::Feedback,
        &["feedback", "message", "notes", "validation", "comment"],
    ),
];

/// Returns the accepted keys for `field` in priority order.
pub fn candidate_keys(field: CanonicalField) -> &'static [&'static str] {
    FIELD_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

/// Returns the first value among `field`'s candidate keys that is present and
/// not `null`.
pub fn resolve_field(record: &Map<String, Value>, field: CanonicalField) -> Option<&Value> {
    candidate_keys(field)
        .iter()
        .find_map(|key| record.get(*key).filter(|value| !value.is_null()))
}

/// Decodes raw response bytes and normalizes them.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for bytes that are not JSON.
/// Returns [`AnalysisContractError::InvalidPayload`] when the JSON is not an
/// object.
pub fn parse_analysis_response(raw: &[u8]) -> Result<AnalysisResult, AnalysisContractError> {
    let payload: Value = serde_json::from_slice(raw)?;
    normalize_analysis_payload(&payload)
}

/// Normalizes a decoded payload into the canonical result.
///
/// Feedback keeps any present non-null value, so `0` and `false` become the
/// text `"0"` and `"false"`; only direction treats falsy values as absent.
///
/// # Errors
/// Returns [`AnalysisContractError::InvalidPayload`] when `payload` is not a
/// JSON object.
pub fn normalize_analysis_payload(payload: &Value) -> Result<AnalysisResult, AnalysisContractError> {
    let record = payload
        .as_object()
        .ok_or_else(|| AnalysisContractError::InvalidPayload {
            found: json_kind(payload),
        })?;

    debug!(
        keys = ?record.keys().collect::<Vec<_>>(),
        "normalizing analysis payload"
    );

    Ok(AnalysisResult {
        direction: normalize_direction(resolve_field(record, CanonicalField::Direction)),
        angle: resolve_field(record, CanonicalField::Angle).and_then(coerce_number),
        speed: resolve_field(record, CanonicalField::Speed).and_then(coerce_number),
        feedback: resolve_field(record, CanonicalField::Feedback)
            .map(stringify)
            .unwrap_or_default(),
        source: ResultSource::Backend,
    })
}

/// Maps a raw direction value onto a [`SwingDirection`].
///
/// Matching is case-insensitive on the trimmed text and checks `fore`, then
/// `back`, then `neutral`. Falsy values (`""`, `0`, `false`) and absent values
/// become `Neutral`; unrecognized labels pass through trimmed.
pub fn normalize_direction(raw: Option<&Value>) -> SwingDirection {
    let Some(raw) = raw.filter(|value| is_truthy(value)) else {
        return SwingDirection::Neutral;
    };

    let text = stringify(raw);
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();

    if lowered.contains("fore") {
        SwingDirection::Forehand
    } else if lowered.contains("back") {
        SwingDirection::Backhand
    } else if lowered.contains("neutral") || trimmed.is_empty() {
        SwingDirection::Neutral
    } else {
        SwingDirection::Other(trimmed.to_string())
    }
}

/// Coerces a raw value into a finite number.
///
/// Finite JSON numbers are kept and strings are parsed after trimming; every
/// other shape, and any non-finite result, is unknown.
pub fn coerce_number(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|value| value.is_finite())
}

fn stringify(raw: &Value) -> String {
    match raw {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// Response bytes are not valid JSON.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Decoded payload is not a key/value record.
    #[error("invalid analysis payload: expected an object, found {found}")]
    InvalidPayload {
        /// JSON kind that was received instead.
        found: &'static str,
    },
}
