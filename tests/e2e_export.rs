//! Session log → CSV document.

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use persona_engine::export::{ANSWER_HEADER, RESULT_HEADER, export_csv_string};
use persona_engine::{
    AnswerSheet, Axis, Classifier, OptionKey, Question, QuestionId, QuestionSet, QuizOption, SessionLog,
    export_csv,
};

fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn quiz() -> QuestionSet {
    QuestionSet::new(vec![
        Question::binary(1, Axis::Behavior, "Lead or follow?").with_version(3),
        Question::binary(2, Axis::Decision, "Gut or data?").with_weight(2.0),
        Question::new(3, Axis::Value, "Change jobs?")
            .with_option(
                QuizOption::new(OptionKey::A, "yes")
                    .with_score(Axis::Value, 1.0)
                    .with_weight(0.5),
            )
            .with_option(QuizOption::new(OptionKey::B, "no").with_score(Axis::Value, -1.0)),
    ])
    .unwrap()
}

#[test]
fn test_full_session_document() {
    let qs = quiz();
    let classifier = Classifier::builtin(qs.clone());
    let mut log = SessionLog::new();
    let mut answers = AnswerSheet::new();

    let picks = [(1u32, OptionKey::A), (2, OptionKey::B), (3, OptionKey::A)];
    for (step, (id, key)) in picks.into_iter().enumerate() {
        let question = qs.get(QuestionId(id)).unwrap();
        answers.select(question.id, key);
        log.record_answer(question, key, at(1_700_000_000_000 + step as i64 * 1_000));
    }
    let result = classifier.classify(&answers);
    log.record_result(&result, at(1_700_000_005_000));

    let csv = export_csv_string(&log).unwrap();
    let expected = format!(
        "{ANSWER_HEADER}\n\
         1700000000000,1,behavior,3,1,A\n\
         1700000001000,2,decision,1,2,B\n\
         1700000002000,3,value,1,0.5,A\n\
         \n\
         {RESULT_HEADER}\n\
         1700000005000,{},{},{}",
        result.primary().code,
        result.secondary().code,
        result.confidence.value,
    );
    assert_eq!(csv, expected);
}

#[test]
fn test_sections_are_separated_by_blank_line() {
    let mut log = SessionLog::new();
    let qs = quiz();
    log.record_answer(qs.get(QuestionId(2)).unwrap(), OptionKey::A, at(0));

    let csv = export_csv_string(&log).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines, vec![ANSWER_HEADER, "0,2,decision,1,2,A", "", RESULT_HEADER]);
}

#[test]
fn test_results_without_answers_keep_two_blank_lines() {
    let qs = quiz();
    let mut log = SessionLog::new();
    log.record_result(&Classifier::builtin(qs).classify(&AnswerSheet::new()), at(9));

    let csv = export_csv_string(&log).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(&lines[..4], [ANSWER_HEADER, "", "", RESULT_HEADER]);
    assert_eq!(lines[4], "9,T1,T2,0");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn test_export_to_writer_matches_string() {
    let qs = quiz();
    let mut log = SessionLog::new();
    log.record_answer(qs.get(QuestionId(1)).unwrap(), OptionKey::B, at(42));

    let mut buf = Vec::new();
    export_csv(&log, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), export_csv_string(&log).unwrap());
}

#[test]
fn test_log_survives_json_round_trip() {
    let qs = quiz();
    let mut log = SessionLog::new();
    log.record_answer(qs.get(QuestionId(3)).unwrap(), OptionKey::B, at(7));
    log.record_result(
        &Classifier::builtin(qs).classify(&AnswerSheet::from_pairs([(3, OptionKey::B)])),
        at(8),
    );

    let json = serde_json::to_string(&log).unwrap();
    let back: SessionLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back.answers, log.answers);
    assert_eq!(back.results.len(), 1);
    assert_eq!(back.results[0].primary, log.results[0].primary);
    assert_eq!(back.results[0].ts, at(8));
}
