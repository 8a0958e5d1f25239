//! The answer-selection mapping supplied by the surrounding application.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::question::{OptionKey, QuestionId};

/// Question id → picked option.
///
/// There is no "skipped" marker. A skipped question and one not yet reached
/// are the same state: the id is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    picks: HashMap<QuestionId, OptionKey>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(id, key)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, OptionKey)>) -> Self {
        pairs.into_iter().map(|(id, key)| (QuestionId(id), key)).collect()
    }

    /// Record (or overwrite) the pick for one question.
    pub fn select(&mut self, id: QuestionId, key: OptionKey) -> Option<OptionKey> {
        self.picks.insert(id, key)
    }

    /// Forget the pick for one question, e.g. when the user steps back.
    pub fn clear(&mut self, id: QuestionId) -> Option<OptionKey> {
        self.picks.remove(&id)
    }

    pub fn get(&self, id: QuestionId) -> Option<OptionKey> {
        self.picks.get(&id).copied()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.picks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, OptionKey)> + '_ {
        self.picks.iter().map(|(&id, &key)| (id, key))
    }
}

impl FromIterator<(QuestionId, OptionKey)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, OptionKey)>>(iter: I) -> Self {
        Self {
            picks: iter.into_iter().collect(),
        }
    }
}
