//! Points in the 4-dimensional trait space.

use serde::{Deserialize, Serialize};

use super::axis::{AXIS_COUNT, Axis};

/// A position in trait space: one real number per axis.
///
/// Used for both a subject's normalized trait vector (every component in
/// [-1, +1] after normalization) and an archetype's centroid. Serializes as
/// a bare JSON array `[behavior, decision, relation, value]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitVector(pub [f64; AXIS_COUNT]);

impl TraitVector {
    pub const ZERO: TraitVector = TraitVector([0.0; AXIS_COUNT]);

    pub const fn new(behavior: f64, decision: f64, relation: f64, value: f64) -> Self {
        Self([behavior, decision, relation, value])
    }

    pub fn dot(&self, other: &TraitVector) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    pub fn as_array(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }

    /// `(axis, component)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self[axis]))
    }
}

impl std::ops::Index<Axis> for TraitVector {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl From<[f64; AXIS_COUNT]> for TraitVector {
    fn from(components: [f64; AXIS_COUNT]) -> Self {
        Self(components)
    }
}

impl std::fmt::Display for TraitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [b, d, r, v] = self.0;
        write!(f, "(behavior: {b:+.3}, decision: {d:+.3}, relation: {r:+.3}, value: {v:+.3})")
    }
}
