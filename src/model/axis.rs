//! Trait axes scored by the quiz.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of trait axes in the shipped configuration.
pub const AXIS_COUNT: usize = 4;

/// One of the four named trait dimensions.
///
/// Axes are identifiers only. Per-axis numbers live in [`AxisTotals`]
/// and [`TraitVector`](super::TraitVector), both indexed by `Axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Behavior,
    Decision,
    Relation,
    Value,
}

impl Axis {
    /// All axes in canonical vector order.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Behavior, Axis::Decision, Axis::Relation, Axis::Value];

    /// Slot of this axis inside a 4-tuple.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Behavior => 0,
            Axis::Decision => 1,
            Axis::Relation => 2,
            Axis::Value => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Behavior => "behavior",
            Axis::Decision => "decision",
            Axis::Relation => "relation",
            Axis::Value => "value",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAxis(s.to_string()))
    }
}

// ============================================================================
// AxisTotals
// ============================================================================

/// Fixed per-axis accumulator.
///
/// Used for both the signed weighted sums and the weighted answer counts
/// produced by aggregation. Always recomputed from scratch, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTotals {
    pub behavior: f64,
    pub decision: f64,
    pub relation: f64,
    pub value: f64,
}

impl AxisTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add `amount` to one axis.
    #[inline]
    pub fn add(&mut self, axis: Axis, amount: f64) {
        self[axis] += amount;
    }

    /// `(axis, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self[axis]))
    }

    pub fn to_array(&self) -> [f64; AXIS_COUNT] {
        [self.behavior, self.decision, self.relation, self.value]
    }
}

impl std::ops::Index<Axis> for AxisTotals {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::Behavior => &self.behavior,
            Axis::Decision => &self.decision,
            Axis::Relation => &self.relation,
            Axis::Value => &self.value,
        }
    }
}

impl std::ops::IndexMut<Axis> for AxisTotals {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::Behavior => &mut self.behavior,
            Axis::Decision => &mut self.decision,
            Axis::Relation => &mut self.relation,
            Axis::Value => &mut self.value,
        }
    }
}
