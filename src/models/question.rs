// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::OPTIONS_PER_QUESTION;

/// Represents the 'questions' table in the database, answer key included.
/// Never serialized to clients directly; see `PublicQuestion`.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,

    /// 0-based index into `[option1, option2, option3, option4]`.
    pub correct_option: i64,
}

impl Question {
    pub fn options(&self) -> [String; OPTIONS_PER_QUESTION] {
        [
            self.option1.clone(),
            self.option2.clone(),
            self.option3.clone(),
            self.option4.clone(),
        ]
    }
}

/// DTO for sending question to client (excludes correct_option).
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
}

/// One question inside an attach-questions payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewQuestion {
    #[validate(length(max = 1000), custom(function = validate_not_blank))]
    pub text: String,
    #[validate(length(max = 500), custom(function = validate_not_blank))]
    pub option1: String,
    #[validate(length(max = 500), custom(function = validate_not_blank))]
    pub option2: String,
    #[validate(length(max = 500), custom(function = validate_not_blank))]
    pub option3: String,
    #[validate(length(max = 500), custom(function = validate_not_blank))]
    pub option4: String,
    /// 0-based index of the correct option.
    #[validate(range(min = 0, max = 3))]
    pub correct_option: i64,
}

/// Request body for attaching questions.
///
/// `questions` is kept as raw JSON so a non-array value can be rejected with a
/// precise message before any element is inspected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddQuestionsRequest {
    #[schema(value_type = Vec<NewQuestion>)]
    pub questions: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsAdded {
    pub message: String,
    pub count: usize,
}

/// Count-only view shown before a user starts a quiz.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCount {
    #[serde(rename = "totalQuestions")]
    pub total_questions: i64,
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}
