//! Answer aggregation: fold picks into per-axis sums and counts.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, AxisTotals, Question, effective_weight};

/// Per-axis accumulators for one scoring request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTally {
    /// Signed, weighted score totals.
    pub sums: AxisTotals,
    /// Weighted count of picks that touched each axis with a non-zero score.
    pub counts: AxisTotals,
    /// Questions whose pick matched one of their options.
    pub answered: usize,
    /// Size of the question set.
    pub total: usize,
}

/// Fold `answers` over `questions`.
///
/// Unanswered questions contribute nothing. A pick whose key matches no
/// option of its question is ignored as if unanswered. Each picked option
/// adds `score × weight` to the sum of every axis it scores, and `weight`
/// to that axis's count when the raw score is non-zero.
pub fn aggregate(questions: &[Question], answers: &AnswerSheet) -> AxisTally {
    let mut tally = AxisTally {
        total: questions.len(),
        ..Default::default()
    };

    for q in questions {
        let Some(key) = answers.get(q.id) else { continue };
        let Some(option) = q.option(key) else {
            tracing::trace!(question = %q.id, key = %key, "pick matches no option; ignored");
            continue;
        };

        tally.answered += 1;
        let weight = effective_weight(q, option);
        for (&axis, &score) in &option.score {
            tally.sums.add(axis, score * weight);
            if score.abs() > 0.0 {
                tally.counts.add(axis, weight);
            }
        }
    }

    tally
}

/// Unweighted per-axis score totals.
///
/// The older fold: raw option scores summed with no weights and no counts.
/// Pairs with fixed-divisor normalization for parity with stored legacy
/// results.
pub fn raw_sums(questions: &[Question], answers: &AnswerSheet) -> AxisTotals {
    let mut sums = AxisTotals::zero();
    for q in questions {
        let Some(option) = answers.get(q.id).and_then(|key| q.option(key)) else {
            continue;
        };
        for (&axis, &score) in &option.score {
            sums.add(axis, score);
        }
    }
    sums
}
