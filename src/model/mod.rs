//! # Quiz Model
//!
//! Plain data that crosses the engine boundary: axes, questions, answer
//! selections, and points in trait space.
//!
//! Design rule: this module is pure data. No scoring, no I/O, no state.

pub mod axis;
pub mod vector;
pub mod question;
pub mod answers;

pub use axis::{Axis, AxisTotals, AXIS_COUNT};
pub use vector::TraitVector;
pub use question::{
    Question, QuestionId, QuestionSet, QuizOption, OptionKey, ScoreMap,
    WeightSource, effective_weight, DEFAULT_WEIGHT,
};
pub use answers::AnswerSheet;
