//! # Archetype Reference Table
//!
//! The fixed set of persona types the engine classifies into, each with a
//! centroid in trait space. The table is data, not code: it carries a
//! version tag, can be loaded from JSON, and is injected into the scoring
//! pipeline so recalibrated centroids ship as a data reload.
//!
//! ```text
//!            behavior  decision  relation  value
//! T1  Leader     +0.8      0.0      +0.7    +0.3
//! T2  Planner    +0.2     +0.6      -0.2    +0.5
//! ...
//! T12 Analyst    -0.4     -0.8      -0.5    -0.3
//! ```

pub mod shared;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::TraitVector;
use crate::{Error, Result};

pub use shared::SharedArchetypes;

/// Fewest entries a table may hold: primary and secondary must be distinct.
pub const MIN_ARCHETYPES: usize = 2;

/// Version tag of the compiled-in table.
pub const BUILTIN_VERSION: &str = "v1";

// ============================================================================
// Archetype
// ============================================================================

/// One persona type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Stable code, e.g. `"T7"`.
    pub code: String,
    pub name: String,
    pub summary: String,
    /// Idealized position in trait space, components roughly in [-1, +1].
    pub centroid: TraitVector,
}

impl Archetype {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        summary: impl Into<String>,
        centroid: TraitVector,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            summary: summary.into(),
            centroid,
        }
    }
}

// ============================================================================
// ArchetypeTable
// ============================================================================

/// Versioned, validated, immutable archetype table.
///
/// Entry order is significant: it breaks similarity ties during ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeTable {
    version: String,
    archetypes: Vec<Archetype>,
}

#[derive(Deserialize)]
struct RawTable {
    version: String,
    archetypes: Vec<Archetype>,
}

impl ArchetypeTable {
    /// Validate and wrap a list of archetypes.
    ///
    /// Requires at least [`MIN_ARCHETYPES`] entries, unique codes and
    /// finite centroids.
    pub fn new(version: impl Into<String>, archetypes: Vec<Archetype>) -> Result<Self> {
        if archetypes.len() < MIN_ARCHETYPES {
            return Err(Error::InvalidArchetypeTable(format!(
                "need at least {MIN_ARCHETYPES} archetypes, got {}",
                archetypes.len()
            )));
        }
        {
            let mut codes = HashSet::with_capacity(archetypes.len());
            for a in &archetypes {
                if !codes.insert(a.code.as_str()) {
                    return Err(Error::InvalidArchetypeTable(format!("duplicate code {}", a.code)));
                }
                if !a.centroid.is_finite() {
                    return Err(Error::InvalidArchetypeTable(format!(
                        "archetype {} has a non-finite centroid",
                        a.code
                    )));
                }
            }
        }
        Ok(Self {
            version: version.into(),
            archetypes,
        })
    }

    /// Load `{"version": "...", "archetypes": [{code, name, summary, centroid}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::new(raw.version, raw.archetypes)
    }

    /// The shipped twelve-type table.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION.to_string(),
            archetypes: builtin_archetypes(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Always false: construction rejects tables under [`MIN_ARCHETYPES`].
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Archetype> {
        self.archetypes.iter()
    }

    pub fn as_slice(&self) -> &[Archetype] {
        &self.archetypes
    }
}

impl<'a> IntoIterator for &'a ArchetypeTable {
    type Item = &'a Archetype;
    type IntoIter = std::slice::Iter<'a, Archetype>;

    fn into_iter(self) -> Self::IntoIter {
        self.archetypes.iter()
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Built-in table
// ============================================================================

// Initial hypothesis centroids; recalibrate by shipping a new table version.
fn builtin_archetypes() -> Vec<Archetype> {
    let entries: [(&str, &str, &str, [f64; 4]); 12] = [
        ("T1", "Leader", "Sets the direction and pulls people along", [0.8, 0.0, 0.7, 0.3]),
        ("T2", "Planner", "Comes up with ideas and gives them shape", [0.2, 0.6, -0.2, 0.5]),
        ("T3", "Adventurer", "Keeps taking on new challenges", [0.9, 0.7, 0.2, 0.9]),
        ("T4", "Supporter", "Backs up the people around them and reassures", [-0.3, 0.0, -0.8, -0.3]),
        ("T5", "Strategist", "Surveys the whole board and maps the winning line", [-0.2, -0.9, -0.1, -0.2]),
        ("T6", "Craftsperson", "Sweats every detail", [-0.6, -0.6, 0.0, -0.7]),
        ("T7", "Challenger", "Thrives on difficulty and hunts for the breakthrough", [0.9, 0.4, 0.6, 0.6]),
        ("T8", "Coordinator", "Connects people and keeps the peace", [-0.1, -0.4, -0.7, -0.1]),
        ("T9", "Guardian", "Acts to protect the team and the organization", [-0.5, -0.5, -0.4, -0.9]),
        ("T10", "Creator", "Produces new value and new designs", [0.3, 0.8, -0.1, 0.7]),
        ("T11", "Mood Maker", "Lifts the room and gets things moving", [0.7, 0.5, 0.8, 0.4]),
        ("T12", "Cool Analyst", "Decides without being swayed by emotion", [-0.4, -0.8, -0.5, -0.3]),
    ];
    entries
        .into_iter()
        .map(|(code, name, summary, c)| Archetype::new(code, name, summary, TraitVector(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<Archetype> {
        vec![
            Archetype::new("X", "x", "", TraitVector::new(1.0, 0.0, 0.0, 0.0)),
            Archetype::new("Y", "y", "", TraitVector::new(0.0, 1.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn builtin_has_twelve_unique_types() {
        let table = ArchetypeTable::builtin();
        assert_eq!(table.len(), 12);
        assert_eq!(table.version(), BUILTIN_VERSION);
        // Revalidating the compiled-in data must succeed.
        assert!(ArchetypeTable::new(BUILTIN_VERSION, table.as_slice().to_vec()).is_ok());
        assert_eq!(table.iter().next().unwrap().code, "T1");
        assert_eq!(table.get("T3").unwrap().centroid, TraitVector::new(0.9, 0.7, 0.2, 0.9));
    }

    #[test]
    fn new_keeps_rows_in_order() {
        let table = ArchetypeTable::new("t", pair()).unwrap();
        let codes: Vec<_> = table.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["X", "Y"]);
        assert_eq!(table.version(), "t");
    }

    #[test]
    fn rejects_single_entry() {
        let mut one = pair();
        one.truncate(1);
        assert!(matches!(ArchetypeTable::new("t", one), Err(Error::InvalidArchetypeTable(_))));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let mut dup = pair();
        dup[1].code = "X".into();
        assert!(ArchetypeTable::new("t", dup).is_err());
    }

    #[test]
    fn rejects_non_finite_centroid() {
        let mut bad = pair();
        bad[0].centroid = TraitVector::new(f64::NAN, 0.0, 0.0, 0.0);
        assert!(ArchetypeTable::new("t", bad).is_err());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "version": "2026-10-recal",
            "archetypes": [
                {"code": "A", "name": "Alpha", "summary": "first", "centroid": [1, 0, 0, 0]},
                {"code": "B", "name": "Beta", "summary": "second", "centroid": [0, -1, 0.5, 0]}
            ]
        }"#;
        let table = ArchetypeTable::from_json(json).unwrap();
        assert_eq!(table.version(), "2026-10-recal");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("B").unwrap().centroid, TraitVector::new(0.0, -1.0, 0.5, 0.0));
    }

    #[test]
    fn json_with_wrong_arity_is_rejected() {
        let json = r#"{"version": "v", "archetypes": [
            {"code": "A", "name": "", "summary": "", "centroid": [1, 0, 0]},
            {"code": "B", "name": "", "summary": "", "centroid": [0, 1, 0, 0]}
        ]}"#;
        assert!(matches!(ArchetypeTable::from_json(json), Err(Error::Json(_))));
    }
}
