// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Map;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppError,
    handlers::quiz::fetch_quiz,
    models::{
        attempt::{Attempt, StartAttemptResponse},
        question::Question,
        submission::{SubmissionResult, SubmitRequest},
    },
    scoring::score_submission,
};

/// Records the start of a quiz attempt and returns its deadline.
///
/// Passing the returned `attemptId` on submit turns on server-side
/// time-limit enforcement for that submission.
#[utoipa::path(
    post,
    path = "/api/quiz/{quiz_id}/start",
    tag = "Submission",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    responses(
        (status = 201, description = "Attempt started", body = StartAttemptResponse),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn start_attempt(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_quiz(&pool, quiz_id).await?;

    let attempt_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();
    let expires_at = TimeDelta::try_seconds(quiz.time_limit)
        .and_then(|limit| started_at.checked_add_signed(limit))
        .ok_or(AppError::InternalServerError(format!(
            "Quiz {} has an unusable time limit: {}",
            quiz_id, quiz.time_limit
        )))?;

    sqlx::query(
        r#"
        INSERT INTO quiz_attempts (id, quiz_id, started_at, expires_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&attempt_id)
    .bind(quiz_id)
    .bind(started_at)
    .bind(expires_at)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!(quiz_id, attempt_id = %attempt_id, "Attempt started");

    Ok((
        StatusCode::CREATED,
        Json(StartAttemptResponse {
            attempt_id,
            quiz_id,
            started_at,
            expires_at,
            time_limit: quiz.time_limit,
        }),
    ))
}

/// Checks that an attempt can still be submitted at `now`.
async fn check_attempt(
    pool: &SqlitePool,
    quiz_id: i64,
    attempt_id: &str,
    grace_seconds: i64,
    now: DateTime<Utc>,
) -> Result<Attempt, AppError> {
    let attempt = sqlx::query_as::<_, Attempt>(
        r#"
        SELECT id, quiz_id, started_at, expires_at, submitted_at
        FROM quiz_attempts
        WHERE id = ?
        "#,
    )
    .bind(attempt_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Attempt not found".to_string()))?;

    if attempt.quiz_id != quiz_id {
        return Err(AppError::BadRequest(
            "Attempt does not belong to this quiz".to_string(),
        ));
    }

    if attempt.submitted_at.is_some() {
        return Err(AppError::Conflict("Attempt already submitted".to_string()));
    }

    if attempt.is_expired(now, grace_seconds) {
        tracing::warn!(
            quiz_id,
            attempt_id,
            expires_at = %attempt.expires_at,
            "Submission rejected after deadline"
        );
        return Err(AppError::BadRequest("Time limit exceeded".to_string()));
    }

    Ok(attempt)
}

/// Marks an attempt as submitted. Only the first caller wins.
async fn mark_submitted(
    pool: &SqlitePool,
    attempt_id: &str,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE quiz_attempts SET submitted_at = ? WHERE id = ? AND submitted_at IS NULL",
    )
    .bind(now)
    .bind(attempt_id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to mark attempt submitted: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict("Attempt already submitted".to_string()));
    }

    Ok(())
}

/// Submits answers for a quiz and returns the score with per-question results.
///
/// * Loads the full answer key, ordered by question id.
/// * Unknown, missing or malformed answers count as unanswered.
/// * A quiz with no questions scores 0 out of 0.
/// * With `attempt_id`, the attempt's deadline is enforced and the attempt
///   is consumed.
#[utoipa::path(
    post,
    path = "/api/quiz/{quiz_id}/submit",
    tag = "Submission",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Scored submission", body = SubmissionResult),
        (status = 400, description = "Time limit exceeded or attempt belongs to another quiz"),
        (status = 404, description = "Attempt not found"),
        (status = 409, description = "Attempt already submitted")
    )
)]
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();

    if let Some(attempt_id) = req.attempt_id.as_deref() {
        check_attempt(&pool, quiz_id, attempt_id, config.submit_grace_seconds, now).await?;
    }

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, text, option1, option2, option3, option4, correct_option
        FROM questions
        WHERE quiz_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch answer key for quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let empty = Map::new();
    let answers = req.answers.as_object().unwrap_or(&empty);

    let result = score_submission(quiz_id, &questions, answers);

    if let Some(attempt_id) = req.attempt_id.as_deref() {
        mark_submitted(&pool, attempt_id, now).await?;
    }

    tracing::info!(
        quiz_id,
        attempt_id = ?req.attempt_id,
        score = result.score,
        total = result.total,
        "Quiz submitted"
    );

    Ok(Json(result))
}
