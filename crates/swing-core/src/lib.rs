#![warn(missing_docs)]
//! # swing-core
//!
//! ## Purpose
//! Defines the canonical swing analysis result shared across the
//! `swing-analyzer` workspace.
//!
//! ## Responsibilities
//! - Represent the normalized [`AnalysisResult`] every analysis path produces.
//! - Model swing direction labels and the provenance of a result.
//! - Format result values and file sizes for display.
//!
//! ## Data flow
//! Backend payloads (via `swing-analysis-contract`) and demo derivations (via
//! `swing-demo`) both produce [`AnalysisResult`], which display code reads
//! through [`format_angle`] and [`format_speed`].
//!
//! ## Ownership and lifetimes
//! Results own their strings so they can outlive the network buffers or file
//! names they were derived from.
//!
//! ## Error model
//! This crate has no fallible operations. Unknown numeric values are modelled
//! as `None`, never as a sentinel number.
//!
//! ## Example
//! ```rust
//! use swing_core::{AnalysisResult, ResultSource, SwingDirection, format_angle};
//!
//! let result = AnalysisResult {
//!     direction: SwingDirection::Forehand,
//!     angle: Some(23.6),
//!     speed: None,
//!     feedback: String::new(),
//!     source: ResultSource::Backend,
//! };
//! assert_eq!(format_angle(result.angle), "24°");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for angle/speed values that are unknown.
pub const UNKNOWN_VALUE_PLACEHOLDER: &str = "—";

/// Default display unit for swing speed.
pub const DEFAULT_SPEED_UNIT: &str = "mph";

/// Swing direction label.
///
/// Recognized directions collapse to the three canonical variants; anything
/// else is carried through as an application-defined label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SwingDirection {
    /// Forehand swing.
    Forehand,
    /// Backhand swing.
    Backhand,
    /// No discernible side.
    #[default]
    Neutral,
    /// Unrecognized label, trimmed with case preserved.
    Other(String),
}

impl SwingDirection {
    /// Canonical directions in the fixed order used by demo derivation.
    pub const CANONICAL: [SwingDirection; 3] = [
        SwingDirection::Forehand,
        SwingDirection::Backhand,
        SwingDirection::Neutral,
    ];

    /// Returns the display label.
    pub fn as_str(&self) -> &str {
        match self {
            SwingDirection::Forehand => "forehand",
            SwingDirection::Backhand => "backhand",
            SwingDirection::Neutral => "neutral",
            SwingDirection::Other(label) => label,
        }
    }

    /// Returns `true` for one of the three canonical directions.
    pub fn is_canonical(&self) -> bool {
        !matches!(self, SwingDirection::Other(_))
    }
}

impl fmt::Display for SwingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SwingDirection {
    fn from(label: String) -> Self {
        match label.as_str() {
            "forehand" => SwingDirection::Forehand,
            "backhand" => SwingDirection::Backhand,
            "neutral" | "" => SwingDirection::Neutral,
            _ => SwingDirection::Other(label),
        }
    }
}

impl From<SwingDirection> for String {
    fn from(direction: SwingDirection) -> Self {
        match direction {
            SwingDirection::Other(label) => label,
            canonical => canonical.as_str().to_string(),
        }
    }
}

/// Where an [`AnalysisResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Normalized from an external analysis service response.
    Backend,
    /// Derived locally by the deterministic fallback generator.
    Demo,
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSource::Backend => f.write_str("backend"),
            ResultSource::Demo => f.write_str("demo"),
        }
    }
}

/// Canonical swing analysis result.
///
/// Produced fresh for every analysis attempt and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Swing direction, `Neutral` when the source provided none.
    pub direction: SwingDirection,
    /// Swing angle in degrees; `None` when unknown.
    pub angle: Option<f64>,
    /// Swing speed magnitude; the unit is a display concern. `None` when unknown.
    pub speed: Option<f64>,
    /// Human-readable feedback, empty when none was provided.
    pub feedback: String,
    /// Provenance tag.
    pub source: ResultSource,
}

impl AnalysisResult {
    /// Returns `true` when the result was derived locally.
    pub fn is_demo(&self) -> bool {
        self.source == ResultSource::Demo
    }
}

/// Formats an angle for display, e.g. `24°`, or the unknown placeholder.
pub fn format_angle(angle: Option<f64>) -> String {
    match angle.filter(|value| value.is_finite()) {
        Some(value) => format!("{}°", round_half_up(value)),
        None => UNKNOWN_VALUE_PLACEHOLDER.to_string(),
    }
}

/// Formats a speed with its unit, e.g. `79 mph`, or the unknown placeholder.
pub fn format_speed(speed: Option<f64>, unit: &str) -> String {
    match speed.filter(|value| value.is_finite()) {
        Some(value) => format!("{} {unit}", round_half_up(value)),
        None => UNKNOWN_VALUE_PLACEHOLDER.to_string(),
    }
}

/// Formats a byte count with binary multiples: `512 B`, `1.5 KB`, `250.0 MB`.
///
/// Plain bytes carry no decimals; larger units carry one. `GB` is the largest
/// unit, so bigger sizes stay expressed in gigabytes.
pub fn human_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut index = 0;
    while size >= 1024.0 && index < UNITS.len() - 1 {
        size /= 1024.0;
        index += 1;
    }

    if index == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.1} {}", UNITS[index])
    }
}

// Halves round toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
