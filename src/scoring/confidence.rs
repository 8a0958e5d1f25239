//! Confidence: how decisive and how complete a classification is.
//!
//! ```text
//! gap        = max(0, primary - secondary)
//! coverage   = min(1, answered / max(1, total))
//! confidence = min(1, 0.7 * gap + 0.3 * coverage)
//! ```
//!
//! The weights are part of the output contract; stored results depend on
//! them bit for bit.

use serde::{Deserialize, Serialize};

/// Weight of the primary/secondary similarity gap.
pub const GAP_WEIGHT: f64 = 0.7;

/// Weight of the answered fraction.
pub const COVERAGE_WEIGHT: f64 = 0.3;

/// Fraction of the question set that was answered, in [0, 1].
pub fn coverage(answered: usize, total: usize) -> f64 {
    (answered as f64 / total.max(1) as f64).min(1.0)
}

/// Blend of similarity gap and coverage, in [0, 1].
pub fn confidence(primary_score: f64, secondary_score: f64, answered: usize, total: usize) -> f64 {
    estimate(primary_score, secondary_score, answered, total).value
}

/// Confidence with its two inputs kept for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceEstimate {
    pub gap: f64,
    pub coverage: f64,
    pub value: f64,
}

pub fn estimate(primary_score: f64, secondary_score: f64, answered: usize, total: usize) -> ConfidenceEstimate {
    // f64::max drops a NaN operand, so a NaN score degrades to a zero gap.
    let gap = (primary_score - secondary_score).max(0.0);
    let coverage = coverage(answered, total);
    let value = (gap * GAP_WEIGHT + coverage * COVERAGE_WEIGHT).min(1.0);
    ConfidenceEstimate { gap, coverage, value }
}
