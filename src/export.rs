//! Session log export: answer and result events as one CSV document.
//!
//! The surrounding application keeps a running log of every pick and every
//! classification, and offers it as a download for offline weight
//! analysis. The document layout:
//!
//! ```text
//! ts,id,axis,version,weight,pick
//! 1760598000000,1,behavior,1,1,A
//! ...
//!
//! results: ts,primary,secondary,conf
//! 1760598123000,T11,T7,0.303
//! ```
//!
//! Timestamps are Unix milliseconds. Where the log is stored is not this
//! crate's concern.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Axis, OptionKey, Question, QuestionId, effective_weight};
use crate::{Classification, Result};

/// Header of the answer section.
pub const ANSWER_HEADER: &str = "ts,id,axis,version,weight,pick";

/// Header of the result section.
pub const RESULT_HEADER: &str = "results: ts,primary,secondary,conf";

/// One recorded pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerLogEntry {
    pub ts: DateTime<Utc>,
    pub id: QuestionId,
    pub axis: Axis,
    pub version: u32,
    /// Weight the pick was scored with.
    pub weight: f64,
    pub pick: OptionKey,
}

/// One recorded classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLogEntry {
    pub ts: DateTime<Utc>,
    pub primary: String,
    pub secondary: String,
    pub conf: f64,
}

/// Append-only log of a quiz session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub answers: Vec<AnswerLogEntry>,
    pub results: Vec<ResultLogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pick on `question`.
    ///
    /// The weight column is the weight the pick was scored with, resolved
    /// option first, then question, then the default. Logs written by older
    /// clients resolved question first, so their rows can differ when both
    /// levels carry a weight. A key that matches no option is still logged,
    /// with the question weight or the default.
    pub fn record_answer(&mut self, question: &Question, pick: OptionKey, ts: DateTime<Utc>) {
        let weight = match question.option(pick) {
            Some(option) => effective_weight(question, option),
            None => question.weight.unwrap_or(crate::model::DEFAULT_WEIGHT),
        };
        self.answers.push(AnswerLogEntry {
            ts,
            id: question.id,
            axis: question.axis,
            version: question.version_or_default(),
            weight,
            pick,
        });
    }

    /// Record the outcome of a classification.
    pub fn record_result(&mut self, result: &Classification, ts: DateTime<Utc>) {
        self.results.push(ResultLogEntry {
            ts,
            primary: result.primary().code.clone(),
            secondary: result.secondary().code.clone(),
            conf: result.confidence.value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.results.is_empty()
    }
}

/// Write `log` as the two-section CSV document.
///
/// Rows within a section are newline-separated with no trailing newline,
/// and the result header is preceded by `"\n\n"`. An empty answer section
/// therefore leaves two blank lines before the result header.
pub fn export_csv(log: &SessionLog, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{ANSWER_HEADER}")?;
    for (i, a) in log.answers.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write!(
            writer,
            "{},{},{},{},{},{}",
            a.ts.timestamp_millis(),
            a.id,
            a.axis,
            a.version,
            a.weight,
            a.pick,
        )?;
    }

    write!(writer, "\n\n{RESULT_HEADER}\n")?;
    for (i, r) in log.results.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write!(
            writer,
            "{},{},{},{}",
            r.ts.timestamp_millis(),
            r.primary,
            r.secondary,
            r.conf,
        )?;
    }

    Ok(())
}

/// Export to a `String`.
pub fn export_csv_string(log: &SessionLog) -> Result<String> {
    let mut buf = Vec::new();
    export_csv(log, &mut buf)?;
    let csv = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(csv)
}
