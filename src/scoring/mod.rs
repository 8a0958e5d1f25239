//! # Scoring Pipeline
//!
//! ```text
//! QuestionSet + AnswerSheet
//!   → aggregate()            AxisTally { sums, counts, answered, total }
//!   → normalize_*()          TraitVector in [-1, +1]^4
//!   → rank()                 Ranking (primary, secondary, ...)
//!   → estimate()             ConfidenceEstimate in [0, 1]
//! ```
//!
//! Every stage is a pure, synchronous, total function. Malformed picks
//! degrade to zero contribution, guarded divisions replace NaN with 0.

pub mod aggregate;
pub mod normalize;
pub mod matcher;
pub mod confidence;

pub use aggregate::{AxisTally, aggregate, raw_sums};
pub use normalize::{clamp_unit, normalize_by_counts, normalize_fixed};
pub use matcher::{ArchetypeMatch, Ranking, cosine_similarity, rank};
pub use confidence::{
    ConfidenceEstimate, COVERAGE_WEIGHT, GAP_WEIGHT, confidence, coverage, estimate,
};
