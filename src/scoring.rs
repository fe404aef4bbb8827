// src/scoring.rs

use serde_json::{Map, Value};

use crate::{
    config::OPTIONS_PER_QUESTION,
    models::{
        question::Question,
        submission::{ResultEntry, SubmissionResult},
    },
};

/// Normalizes a raw submitted answer into a 0-based option index.
///
/// Integers (and floats with no fractional part) are taken as-is, strings are
/// trimmed and parsed. Anything else, or an index outside the option range,
/// counts as unanswered.
pub fn normalize_answer(raw: Option<&Value>) -> Option<i64> {
    let index = match raw? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;

    (0..OPTIONS_PER_QUESTION as i64)
        .contains(&index)
        .then_some(index)
}

/// Scores a submission against the quiz's answer key.
///
/// `questions` must already be in presentation order (id ascending); results
/// follow that order. Questions missing from `answers` are unanswered and
/// never correct.
pub fn score_submission(
    quiz_id: i64,
    questions: &[Question],
    answers: &Map<String, Value>,
) -> SubmissionResult {
    let mut score = 0;

    let results: Vec<ResultEntry> = questions
        .iter()
        .map(|q| {
            let user_answer = normalize_answer(answers.get(&q.id.to_string()));
            let is_correct = user_answer == Some(q.correct_option);
            if is_correct {
                score += 1;
            }

            ResultEntry {
                id: q.id,
                question_text: q.text.clone(),
                options: q.options(),
                user_answer,
                correct_answer: q.correct_option,
                is_correct,
            }
        })
        .collect();

    SubmissionResult {
        quiz_id,
        score,
        total: questions.len(),
        results,
    }
}
