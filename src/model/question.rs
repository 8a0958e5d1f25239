//! Question definitions and the question set.
//!
//! A [`Question`] probes one primary axis and offers exactly two
//! [`QuizOption`]s keyed `A` and `B`. Each option carries a partial
//! axis → signed score map; an absent axis contributes zero.

use std::str::FromStr;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::axis::{AXIS_COUNT, Axis, AxisTotals};
use crate::{Error, Result};

/// Weight applied when neither the option nor the question carries one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for QuestionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Which of the two options was picked.
///
/// Parses `"A"`/`"B"` and the legacy numeric spellings `"1"`/`"2"` that
/// older question files use. Matching is exact: case and whitespace
/// variants are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OptionKey {
    A,
    B,
}

impl OptionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
        }
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" | "1" => Ok(OptionKey::A),
            "B" | "2" => Ok(OptionKey::B),
            other => Err(Error::InvalidOptionKey(other.to_string())),
        }
    }
}

impl TryFrom<String> for OptionKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

// ============================================================================
// Options and questions
// ============================================================================

/// Per-axis signed score contributions of one option.
pub type ScoreMap = HashMap<Axis, f64>;

/// One selectable choice of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub key: OptionKey,
    pub label: String,
    #[serde(default)]
    pub score: ScoreMap,
    /// Overrides the question-level weight when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl QuizOption {
    pub fn new(key: OptionKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            score: ScoreMap::new(),
            weight: None,
        }
    }

    pub fn with_score(mut self, axis: Axis, score: f64) -> Self {
        self.score.insert(axis, score);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Unweighted contribution to `axis` (zero when absent).
    pub fn score_for(&self, axis: Axis) -> f64 {
        self.score.get(&axis).copied().unwrap_or(0.0)
    }
}

/// An immutable quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// The axis this question primarily probes.
    pub axis: Axis,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub options: SmallVec<[QuizOption; 2]>,
}

impl Question {
    pub fn new(id: u32, axis: Axis, prompt: impl Into<String>) -> Self {
        Self {
            id: QuestionId(id),
            axis,
            prompt: prompt.into(),
            weight: None,
            version: None,
            options: SmallVec::new(),
        }
    }

    pub fn with_option(mut self, option: QuizOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Shorthand for the common shape: option A scores `+1` and option B
    /// scores `-1` on the probed axis.
    pub fn binary(id: u32, axis: Axis, prompt: impl Into<String>) -> Self {
        Self::new(id, axis, prompt)
            .with_option(QuizOption::new(OptionKey::A, "A").with_score(axis, 1.0))
            .with_option(QuizOption::new(OptionKey::B, "B").with_score(axis, -1.0))
    }

    /// The option matching `key`, if any.
    pub fn option(&self, key: OptionKey) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.key == key)
    }

    /// Version tag, defaulting to 1 for untagged questions.
    pub fn version_or_default(&self) -> u32 {
        self.version.unwrap_or(1)
    }
}

// ============================================================================
// Weight fallback chain
// ============================================================================

/// Where an effective weight came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightSource {
    FromOption(f64),
    FromQuestion(f64),
    Default,
}

impl WeightSource {
    /// Resolve in order: option weight, then question weight, then default.
    pub fn resolve(question: &Question, option: &QuizOption) -> Self {
        if let Some(w) = option.weight {
            WeightSource::FromOption(w)
        } else if let Some(w) = question.weight {
            WeightSource::FromQuestion(w)
        } else {
            WeightSource::Default
        }
    }

    pub fn value(self) -> f64 {
        match self {
            WeightSource::FromOption(w) | WeightSource::FromQuestion(w) => w,
            WeightSource::Default => DEFAULT_WEIGHT,
        }
    }
}

/// Weight applied to `option`'s scores when it is picked on `question`.
#[inline]
pub fn effective_weight(question: &Question, option: &QuizOption) -> f64 {
    WeightSource::resolve(question, option).value()
}

// ============================================================================
// QuestionSet
// ============================================================================

/// Ordered, validated, immutable set of questions.
///
/// Shared read-only across any number of scoring calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate and wrap a question list.
    ///
    /// Rejects duplicate ids, questions without exactly two options, option
    /// pairs sharing a key, non-finite scores and negative or non-finite
    /// weights.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(Error::InvalidQuestionSet(format!("duplicate question id {}", q.id)));
            }
            if q.options.len() != 2 {
                return Err(Error::InvalidQuestionSet(format!(
                    "question {} has {} options, expected 2",
                    q.id,
                    q.options.len()
                )));
            }
            if q.options[0].key == q.options[1].key {
                return Err(Error::InvalidQuestionSet(format!(
                    "question {} repeats option key {}",
                    q.id, q.options[0].key
                )));
            }
            check_weight(q.id, q.weight)?;
            for opt in &q.options {
                check_weight(q.id, opt.weight)?;
                if let Some((axis, _)) = opt.score.iter().find(|(_, s)| !s.is_finite()) {
                    return Err(Error::InvalidQuestionSet(format!(
                        "question {} option {} has non-finite score on {}",
                        q.id, opt.key, axis
                    )));
                }
            }
        }
        Ok(Self { questions })
    }

    /// Parse the JSON question asset (an array of question records).
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Theoretical maximum weighted magnitude per axis.
    ///
    /// For each axis, sums over questions the largest `|score × weight|`
    /// any single option can contribute, then returns the largest of the
    /// four per-axis totals. This is the divisor for fixed-divisor
    /// normalization.
    pub fn max_abs_per_axis(&self) -> f64 {
        let mut totals = AxisTotals::zero();
        for q in &self.questions {
            let mut best = [0.0f64; AXIS_COUNT];
            for opt in &q.options {
                let w = effective_weight(q, opt);
                for (&axis, &score) in &opt.score {
                    let slot = &mut best[axis.index()];
                    *slot = slot.max((score * w).abs());
                }
            }
            for axis in Axis::ALL {
                totals.add(axis, best[axis.index()]);
            }
        }
        totals.iter().map(|(_, v)| v).fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

impl AsRef<[Question]> for QuestionSet {
    fn as_ref(&self) -> &[Question] {
        &self.questions
    }
}

fn check_weight(id: QuestionId, weight: Option<f64>) -> Result<()> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => Err(Error::InvalidQuestionSet(format!(
            "question {id} has invalid weight {w}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 1, "axis": "behavior", "question": "Weekend plans?", "weight": 1.5, "version": 2,
            "options": [
                {"key": "1", "label": "Go out", "score": {"behavior": 1}},
                {"key": "2", "label": "Stay in", "score": {"behavior": -1}, "weight": 0.5}
            ]
        },
        {
            "id": 2, "axis": "value", "question": "New or proven?",
            "options": [
                {"key": "A", "label": "New", "score": {"value": 1, "decision": 0.5}},
                {"key": "B", "label": "Proven", "score": {"value": -1}}
            ]
        }
    ]"#;

    #[test]
    fn parses_legacy_numeric_keys() {
        let set = QuestionSet::from_json(SAMPLE).unwrap();
        let q = set.get(QuestionId(1)).unwrap();
        assert_eq!(q.options[0].key, OptionKey::A);
        assert_eq!(q.options[1].key, OptionKey::B);
        assert_eq!(q.prompt, "Weekend plans?");
        assert_eq!(q.version_or_default(), 2);
        assert_eq!(set.get(QuestionId(2)).unwrap().version_or_default(), 1);
    }

    #[test]
    fn option_key_parsing_is_exact() {
        assert_eq!("A".parse::<OptionKey>().unwrap(), OptionKey::A);
        assert_eq!("2".parse::<OptionKey>().unwrap(), OptionKey::B);
        for bad in ["a", "b", " A", "B ", "", "C", "3"] {
            assert!(
                matches!(bad.parse::<OptionKey>(), Err(Error::InvalidOptionKey(_))),
                "{bad:?} must be rejected"
            );
        }
        let lower = r#"[{"id": 1, "axis": "value", "question": "q",
            "options": [{"key": "a", "label": "", "score": {}}, {"key": "b", "label": "", "score": {}}]}]"#;
        assert!(QuestionSet::from_json(lower).is_err());
    }

    #[test]
    fn weight_fallback_order() {
        let set = QuestionSet::from_json(SAMPLE).unwrap();
        let q1 = set.get(QuestionId(1)).unwrap();
        assert_eq!(WeightSource::resolve(q1, &q1.options[0]), WeightSource::FromQuestion(1.5));
        assert_eq!(WeightSource::resolve(q1, &q1.options[1]), WeightSource::FromOption(0.5));

        let q2 = set.get(QuestionId(2)).unwrap();
        assert_eq!(WeightSource::resolve(q2, &q2.options[0]), WeightSource::Default);
        assert_eq!(effective_weight(q2, &q2.options[0]), DEFAULT_WEIGHT);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let qs = vec![
            Question::binary(7, Axis::Value, "a"),
            Question::binary(7, Axis::Behavior, "b"),
        ];
        assert!(matches!(QuestionSet::new(qs), Err(Error::InvalidQuestionSet(_))));
    }

    #[test]
    fn rejects_wrong_option_count_and_repeated_keys() {
        let one = Question::new(1, Axis::Value, "x").with_option(QuizOption::new(OptionKey::A, "a"));
        assert!(QuestionSet::new(vec![one]).is_err());

        let twins = Question::new(1, Axis::Value, "x")
            .with_option(QuizOption::new(OptionKey::A, "a"))
            .with_option(QuizOption::new(OptionKey::A, "b"));
        assert!(QuestionSet::new(vec![twins]).is_err());
    }

    #[test]
    fn rejects_negative_weight() {
        let q = Question::binary(1, Axis::Value, "x").with_weight(-2.0);
        assert!(QuestionSet::new(vec![q]).is_err());
    }

    #[test]
    fn rejects_unknown_option_key() {
        let bad = r#"[{"id": 1, "axis": "value", "question": "?", "options": [
            {"key": "C", "label": "c", "score": {}},
            {"key": "A", "label": "a", "score": {}}
        ]}]"#;
        assert!(matches!(QuestionSet::from_json(bad), Err(Error::Json(_))));
    }

    #[test]
    fn max_abs_per_axis_takes_heaviest_axis() {
        let set = QuestionSet::from_json(SAMPLE).unwrap();
        // behavior: max(|1*1.5|, |-1*0.5|) = 1.5
        // value: 1, decision: 0.5
        assert!((set.max_abs_per_axis() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn max_abs_per_axis_of_balanced_set() {
        let set = QuestionSet::new(
            Axis::ALL
                .into_iter()
                .enumerate()
                .map(|(i, axis)| Question::binary(i as u32 + 1, axis, "q"))
                .collect(),
        )
        .unwrap();
        assert_eq!(set.max_abs_per_axis(), 1.0);
    }
}
