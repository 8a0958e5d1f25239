//! Normalization of axis sums into a bounded trait vector.
//!
//! Two strategies coexist:
//!
//! | Strategy          | Divisor per axis                       |
//! |-------------------|----------------------------------------|
//! | Fixed divisor     | one constant for every axis            |
//! | Coverage-adjusted | that axis's own weighted answer count  |
//!
//! Every output component is clamped to [-1, +1] and is never NaN.

use crate::model::{AXIS_COUNT, Axis, AxisTotals, TraitVector};

use super::aggregate::AxisTally;

/// Clamp into [-1, +1], mapping NaN to 0.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) }
}

/// Zero, negative and non-finite fixed divisors act as 1.
#[inline]
fn safe_divisor(d: f64) -> f64 {
    if d.is_finite() && d > 0.0 { d } else { 1.0 }
}

/// Only a zero count is replaced; any other count divides as is.
#[inline]
fn count_divisor(count: f64) -> f64 {
    if count == 0.0 { 1.0 } else { count }
}

/// Divide every axis sum by `max_abs_per_axis` and clamp.
pub fn normalize_fixed(sums: &AxisTotals, max_abs_per_axis: f64) -> TraitVector {
    let divisor = safe_divisor(max_abs_per_axis);
    let mut out = [0.0; AXIS_COUNT];
    for axis in Axis::ALL {
        out[axis.index()] = clamp_unit(sums[axis] / divisor);
    }
    TraitVector(out)
}

/// Divide every axis sum by that axis's weighted count and clamp.
///
/// An axis no pick touched has count 0, which divides as 1 and yields 0.
pub fn normalize_by_counts(tally: &AxisTally) -> TraitVector {
    let mut out = [0.0; AXIS_COUNT];
    for axis in Axis::ALL {
        out[axis.index()] = clamp_unit(tally.sums[axis] / count_divisor(tally.counts[axis]));
    }
    TraitVector(out)
}
