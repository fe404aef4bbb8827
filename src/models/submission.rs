// src/models/submission.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::OPTIONS_PER_QUESTION;

/// DTO for submitting a quiz.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRequest {
    /// User's answers map.
    /// Key: Question ID (as a JSON object key)
    /// Value: 0-based option index, as a number or numeric string.
    /// Anything that is not an object is treated as "no answers".
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answers: serde_json::Value,

    /// Attempt returned by the start endpoint. When present the attempt's
    /// deadline is enforced and the attempt can only be submitted once.
    /// Accepted under the same `attemptId` key the start endpoint returns.
    #[serde(alias = "attemptId")]
    pub attempt_id: Option<String>,
}

/// Per-question outcome of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub id: i64,
    pub question_text: String,
    #[schema(value_type = Vec<String>)]
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Normalized 0-based answer, `null` when unanswered or unreadable.
    pub user_answer: Option<i64>,
    pub correct_answer: i64,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub quiz_id: i64,
    pub score: usize,
    pub total: usize,
    pub results: Vec<ResultEntry>,
}
