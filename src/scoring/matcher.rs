//! Nearest-centroid archetype matching by cosine similarity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::archetype::ArchetypeTable;
use crate::model::TraitVector;

/// Cosine of the angle between `a` and `b`, in [-1, +1].
///
/// Defined as 0 when either vector is zero or has a non-finite component.
/// Both vectors are rescaled by their largest absolute component first, so
/// centroids near `f64::MAX` cannot overflow the dot product.
pub fn cosine_similarity(a: &TraitVector, b: &TraitVector) -> f64 {
    let (Some(a), Some(b)) = (rescaled(a), rescaled(b)) else {
        return 0.0;
    };
    let dot = a.dot(&b);
    let m = a.magnitude() * b.magnitude();
    if dot == 0.0 || m == 0.0 {
        return 0.0;
    }
    (dot / m).clamp(-1.0, 1.0)
}

/// `v` divided by its largest absolute component; `None` for zero or
/// non-finite vectors.
fn rescaled(v: &TraitVector) -> Option<TraitVector> {
    if !v.is_finite() {
        return None;
    }
    let peak = v.0.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    if peak == 0.0 {
        return None;
    }
    Some(TraitVector(v.0.map(|x| x / peak)))
}

/// Descending by score, non-finite scores last.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.total_cmp(&a),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// One archetype's similarity to the subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeMatch {
    pub code: String,
    /// Index of the archetype in its table.
    pub position: usize,
    /// Cosine similarity in [-1, +1].
    pub score: f64,
}

/// Every archetype of a table, best match first.
///
/// Holds exactly one entry per table row. Tables carry at least two rows,
/// so primary and secondary always exist and are distinct archetypes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<ArchetypeMatch>,
}

impl Ranking {
    pub fn primary(&self) -> &ArchetypeMatch {
        &self.entries[0]
    }

    pub fn secondary(&self) -> &ArchetypeMatch {
        &self.entries[1]
    }

    pub fn entries(&self) -> &[ArchetypeMatch] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArchetypeMatch> {
        self.entries.iter()
    }

    /// Similarity of one archetype by code.
    pub fn score_of(&self, code: &str) -> Option<f64> {
        self.entries.iter().find(|m| m.code == code).map(|m| m.score)
    }

    /// 0-based rank of one archetype by code.
    pub fn rank_of(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|m| m.code == code)
    }
}

/// Score `vector` against every centroid and sort descending.
///
/// The sort is stable, so equal scores keep table order.
pub fn rank(vector: &TraitVector, table: &ArchetypeTable) -> Ranking {
    let mut entries: Vec<ArchetypeMatch> = table
        .iter()
        .enumerate()
        .map(|(position, a)| ArchetypeMatch {
            code: a.code.clone(),
            position,
            score: cosine_similarity(vector, &a.centroid),
        })
        .collect();

    entries.sort_by(|a, b| by_score_desc(a.score, b.score));
    Ranking { entries }
}
