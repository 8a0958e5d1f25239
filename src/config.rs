//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::model::QuestionSet;

/// How raw axis sums become a bounded trait vector.
///
/// Both strategies stay selectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Normalization {
    /// Divide each axis by its own weighted answer count.
    #[default]
    CoverageAdjusted,
    /// Divide every axis by one explicit constant.
    FixedDivisor { max_abs_per_axis: f64 },
    /// Divide every axis by [`QuestionSet::max_abs_per_axis`].
    FixedDivisorFromQuestions,
}

impl Normalization {
    /// The fixed divisor this strategy uses against `questions`, if any.
    pub fn fixed_divisor(&self, questions: &QuestionSet) -> Option<f64> {
        match self {
            Normalization::CoverageAdjusted => None,
            Normalization::FixedDivisor { max_abs_per_axis } => Some(*max_abs_per_axis),
            Normalization::FixedDivisorFromQuestions => Some(questions.max_abs_per_axis()),
        }
    }
}

/// Configuration for a [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub normalization: Normalization,
}

impl ScoringConfig {
    pub fn coverage_adjusted() -> Self {
        Self {
            normalization: Normalization::CoverageAdjusted,
        }
    }

    pub fn fixed_divisor(max_abs_per_axis: f64) -> Self {
        Self {
            normalization: Normalization::FixedDivisor { max_abs_per_axis },
        }
    }

    pub fn fixed_divisor_from_questions() -> Self {
        Self {
            normalization: Normalization::FixedDivisorFromQuestions,
        }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axis, Question};

    #[test]
    fn default_is_coverage_adjusted() {
        assert_eq!(ScoringConfig::default().normalization, Normalization::CoverageAdjusted);
        assert_eq!(ScoringConfig::from_json("{}").unwrap(), ScoringConfig::default());
    }

    #[test]
    fn parses_tagged_strategies() {
        let c = ScoringConfig::from_json(
            r#"{"normalization": {"strategy": "fixed_divisor", "max_abs_per_axis": 12.0}}"#,
        )
        .unwrap();
        assert_eq!(c, ScoringConfig::fixed_divisor(12.0));

        let c = ScoringConfig::from_json(
            r#"{"normalization": {"strategy": "fixed_divisor_from_questions"}}"#,
        )
        .unwrap();
        assert_eq!(c, ScoringConfig::fixed_divisor_from_questions());
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        assert!(ScoringConfig::from_json(r#"{"normalization": {"strategy": "zscore"}}"#).is_err());
    }

    #[test]
    fn fixed_divisor_resolution() {
        let qs = QuestionSet::new(vec![
            Question::binary(1, Axis::Behavior, "a").with_weight(2.0),
            Question::binary(2, Axis::Behavior, "b"),
        ])
        .unwrap();
        assert_eq!(Normalization::CoverageAdjusted.fixed_divisor(&qs), None);
        assert_eq!(Normalization::FixedDivisor { max_abs_per_axis: 7.0 }.fixed_divisor(&qs), Some(7.0));
        assert_eq!(Normalization::FixedDivisorFromQuestions.fixed_divisor(&qs), Some(3.0));
    }
}
