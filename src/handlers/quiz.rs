// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::DEFAULT_TIME_LIMIT_SECONDS,
    error::AppError,
    models::quiz::{CreateQuizRequest, Quiz, QuizCreated},
};

/// Loads a quiz by id, mapping a missing row to `NotFound`.
pub(crate) async fn fetch_quiz(pool: &SqlitePool, id: i64) -> Result<Quiz, AppError> {
    sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, title, description, time_limit, created_at
        FROM quizzes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Creates a new quiz.
///
/// * Title is required and must not be blank.
/// * Text is stored exactly as given (trimmed); clients escape on output.
/// * A missing or non-positive `time_limit` falls back to 30 minutes.
#[utoipa::path(
    post,
    path = "/api/quiz",
    tag = "Quiz",
    request_body = CreateQuizRequest,
    responses(
        (status = 201, description = "Quiz created", body = QuizCreated),
        (status = 400, description = "Missing title or invalid fields")
    )
)]
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::BadRequest("Title is required".to_string()))?;

    payload.validate()?;

    let title = title.to_string();
    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let time_limit = payload
        .time_limit
        .filter(|t| *t > 0)
        .unwrap_or(DEFAULT_TIME_LIMIT_SECONDS);

    let quiz_id = sqlx::query(
        r#"
        INSERT INTO quizzes (title, description, time_limit, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(time_limit)
    .bind(Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    tracing::info!(quiz_id, time_limit, "Quiz created");

    Ok((
        StatusCode::CREATED,
        Json(QuizCreated {
            message: "Quiz created".to_string(),
            quiz_id,
        }),
    ))
}

/// Lists all quizzes, newest first.
#[utoipa::path(
    get,
    path = "/api/quiz",
    tag = "Quiz",
    responses((status = 200, description = "All quizzes", body = Vec<Quiz>))
)]
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, title, description, time_limit, created_at
        FROM quizzes
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Retrieves a single quiz by ID.
#[utoipa::path(
    get,
    path = "/api/quiz/{quiz_id}",
    tag = "Quiz",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Quiz", body = Quiz),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_quiz(&pool, quiz_id).await?;
    Ok(Json(quiz))
}

/// Deletes a quiz. Its questions and attempts are removed by cascade.
#[utoipa::path(
    delete,
    path = "/api/quiz/{quiz_id}",
    tag = "Quiz",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    tracing::info!(quiz_id, "Quiz deleted");

    Ok(StatusCode::NO_CONTENT)
}
