//! # persona-engine: Persona Classification Engine
//!
//! Maps binary (A/B) quiz answers onto a 4-axis trait vector, picks the
//! nearest persona archetype by cosine similarity, and scores how
//! confident that pick is.
//!
//! ## Design Principles
//!
//! 1. **Pure pipeline**: Aggregate → Normalize → Match → Confidence, no I/O, no shared mutable state
//! 2. **Total functions**: bad picks and empty inputs degrade to defined numbers, never errors
//! 3. **Data, not code**: the archetype table is versioned and injected, so recalibration is a reload
//! 4. **Validation at the edge**: only loading question sets and tables can fail
//!
//! ## Quick Start
//!
//! ```rust
//! use persona_engine::{AnswerSheet, Classifier, OptionKey, QuestionSet};
//!
//! # fn example() -> persona_engine::Result<()> {
//! let questions = QuestionSet::from_json(r#"[
//!     {"id": 1, "axis": "behavior", "question": "Lead or follow?",
//!      "options": [{"key": "A", "label": "Lead",   "score": {"behavior": 1}},
//!                  {"key": "B", "label": "Follow", "score": {"behavior": -1}}]}
//! ]"#)?;
//! let classifier = Classifier::builtin(questions);
//!
//! let answers = AnswerSheet::from_pairs([(1, OptionKey::A)]);
//! let result = classifier.classify(&answers);
//! println!("{} ({:.2})", result.primary().code, result.confidence.value);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod archetype;
pub mod scoring;
pub mod config;
pub mod export;

use std::sync::Arc;

use serde::Serialize;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Axis, AxisTotals, TraitVector, Question, QuestionId, QuestionSet, QuizOption,
    OptionKey, AnswerSheet, WeightSource, effective_weight,
};
pub use archetype::{Archetype, ArchetypeTable, SharedArchetypes};
pub use scoring::{AxisTally, ArchetypeMatch, Ranking, ConfidenceEstimate};
pub use config::{Normalization, ScoringConfig};
pub use export::{SessionLog, AnswerLogEntry, ResultLogEntry, export_csv};

// ============================================================================
// Classification result
// ============================================================================

/// Everything one scoring request produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub tally: AxisTally,
    /// Normalized trait vector, every component in [-1, +1].
    pub vector: TraitVector,
    pub ranking: Ranking,
    pub confidence: ConfidenceEstimate,
    /// Version of the archetype table the ranking was computed against.
    pub table_version: String,
}

impl Classification {
    pub fn primary(&self) -> &ArchetypeMatch {
        self.ranking.primary()
    }

    pub fn secondary(&self) -> &ArchetypeMatch {
        self.ranking.secondary()
    }
}

/// Run the full pipeline once.
pub fn classify(
    questions: &QuestionSet,
    answers: &AnswerSheet,
    table: &ArchetypeTable,
    config: &ScoringConfig,
) -> Classification {
    // Phase 1: Aggregate
    let tally = scoring::aggregate(questions.questions(), answers);

    // Phase 2: Normalize
    let vector = match config.normalization.fixed_divisor(questions) {
        Some(divisor) => scoring::normalize_fixed(&tally.sums, divisor),
        None => scoring::normalize_by_counts(&tally),
    };

    // Phase 3: Match
    let ranking = scoring::rank(&vector, table);

    // Phase 4: Confidence
    let confidence = scoring::estimate(
        ranking.primary().score,
        ranking.secondary().score,
        tally.answered,
        tally.total,
    );

    tracing::debug!(
        primary = %ranking.primary().code,
        secondary = %ranking.secondary().code,
        confidence = confidence.value,
        answered = tally.answered,
        total = tally.total,
        table = table.version(),
        "classified"
    );

    Classification {
        tally,
        vector,
        ranking,
        confidence,
        table_version: table.version().to_string(),
    }
}

// ============================================================================
// Top-level Classifier handle
// ============================================================================

/// The primary entry point. A `Classifier` binds a question set, an
/// archetype table and a scoring configuration.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    questions: QuestionSet,
    archetypes: Arc<ArchetypeTable>,
    config: ScoringConfig,
}

impl Classifier {
    pub fn new(
        questions: QuestionSet,
        archetypes: impl Into<Arc<ArchetypeTable>>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            questions,
            archetypes: archetypes.into(),
            config,
        }
    }

    /// Built-in twelve-type table, coverage-adjusted normalization.
    pub fn builtin(questions: QuestionSet) -> Self {
        Self::new(questions, ArchetypeTable::builtin(), ScoringConfig::default())
    }

    /// Bind to the current table of a shared handle.
    pub fn from_shared(questions: QuestionSet, shared: &SharedArchetypes, config: ScoringConfig) -> Self {
        Self::new(questions, shared.snapshot(), config)
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Score one answer snapshot.
    pub fn classify(&self, answers: &AnswerSheet) -> Classification {
        classify(&self.questions, answers, &self.archetypes, &self.config)
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn archetypes(&self) -> &ArchetypeTable {
        &self.archetypes
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid question set: {0}")]
    InvalidQuestionSet(String),

    #[error("Invalid archetype table: {0}")]
    InvalidArchetypeTable(String),

    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    #[error("Invalid option key: {0:?}")]
    InvalidOptionKey(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
