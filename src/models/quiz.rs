// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    /// Time allowed to complete the quiz, in seconds.
    pub time_limit: i64,

    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new quiz.
///
/// `title` is optional at the serde level so a missing title surfaces as
/// "Title is required" instead of a generic deserialization error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuizRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Seconds. Missing, zero or negative falls back to the default of 1800.
    #[validate(range(max = 604800))]
    pub time_limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizCreated {
    pub message: String,
    #[serde(rename = "quizId")]
    pub quiz_id: i64,
}
