#![warn(missing_docs)]
//! # swing-demo
//!
//! ## Purpose
//! Derives deterministic placeholder analysis results when no analysis service
//! is configured or reachable.
//!
//! ## Responsibilities
//! - Hash a seed name with 32-bit FNV-1a.
//! - Map the seed onto a canonical direction and bounded angle/speed values.
//! - Attach canned feedback for the chosen direction.
//!
//! ## Data flow
//! File name -> [`demo_seed`] -> [`generate_fallback`] -> [`AnalysisResult`]
//! tagged [`ResultSource::Demo`].
//!
//! ## Ownership and lifetimes
//! Only the seed name is borrowed; the returned result owns its feedback text.
//!
//! ## Error model
//! Generation is total. An empty seed name is replaced with [`DEFAULT_SEED_NAME`].
//!
//! ## Example
//! ```rust
//! use swing_demo::generate_fallback;
//!
//! let first = generate_fallback("clip_forehand_01.mp4");
//! let second = generate_fallback("clip_forehand_01.mp4");
//! assert_eq!(first, second);
//! assert_eq!(first.angle, Some(24.0));
//! ```

use swing_core::{AnalysisResult, ResultSource, SwingDirection};

/// Seed used when the caller has no file name.
pub const DEFAULT_SEED_NAME: &str = "demo";

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Smallest demo angle in degrees.
pub const MIN_DEMO_ANGLE: u32 = 10;

/// Number of distinct demo angles (`10..=45`).
pub const DEMO_ANGLE_SPAN: u32 = 36;

/// Smallest demo speed.
pub const MIN_DEMO_SPEED: u32 = 55;

/// Number of distinct demo speeds (`55..=100`).
pub const DEMO_SPEED_SPAN: u32 = 46;

/// Feedback used if a direction has no canned entry.
pub const GENERIC_FEEDBACK: &str = "Solid swing. Keep practicing consistent footwork.";

const DIRECTION_FEEDBACK: [(&str, &str); 3] = [
    (
        "forehand",
        "Good shoulder rotation. Keep your wrist stable through contact for cleaner topspin.",
    ),
    (
        "backhand",
        "Nice unit turn. Try to finish higher to improve depth and control.",
    ),
    (
        "neutral",
        "Balanced swing path. Focus on timing and consistent contact point.",
    ),
];

/// Computes the 32-bit FNV-1a hash over the UTF-16 code units of `input`.
///
/// The result is the raw unsigned accumulator; see [`demo_seed`] for the
/// non-negative seed used by the generator.
pub fn fnv1a_32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Returns the seed for `name`: the absolute value of its FNV-1a hash read as
/// a signed 32-bit integer.
///
/// `i32::MIN` maps to `2_147_483_648`, so the seed is always representable.
pub fn demo_seed(name: &str) -> u32 {
    let name = if name.is_empty() {
        DEFAULT_SEED_NAME
    } else {
        name
    };

    (fnv1a_32(name) as i32).unsigned_abs()
}

/// Generates the deterministic fallback result for `seed_name`.
///
/// Identical names always produce identical results, on every platform.
pub fn generate_fallback(seed_name: &str) -> AnalysisResult {
    let seed = demo_seed(seed_name);

    let canonical = &SwingDirection::CANONICAL;
    let direction = canonical[seed as usize % canonical.len()].clone();
    let angle = MIN_DEMO_ANGLE + seed % DEMO_ANGLE_SPAN;
    let speed = MIN_DEMO_SPEED + seed % DEMO_SPEED_SPAN;

    AnalysisResult {
        feedback: feedback_for(&direction).to_string(),
        direction,
        angle: Some(f64::from(angle)),
        speed: Some(f64::from(speed)),
        source: ResultSource::Demo,
    }
}

/// Returns the canned feedback for `direction`.
pub fn feedback_for(direction: &SwingDirection) -> &'static str {
    DIRECTION_FEEDBACK
        .iter()
        .find(|(label, _)| *label == direction.as_str())
        .map(|(_, feedback)| *feedback)
        .unwrap_or(GENERIC_FEEDBACK)
}
