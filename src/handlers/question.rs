// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::fetch_quiz,
    models::question::{
        AddQuestionsRequest, NewQuestion, PublicQuestion, QuestionCount, QuestionsAdded,
    },
};

/// Parses, trims and validates every element of an attach-questions payload.
/// The first bad element rejects the whole batch.
fn parse_questions(items: &[Value]) -> Result<Vec<NewQuestion>, AppError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<NewQuestion, AppError> {
            let q: NewQuestion = serde_json::from_value(item.clone())
                .map_err(|e| AppError::BadRequest(format!("Invalid question at index {}: {}", i, e)))?;

            let q = NewQuestion {
                text: q.text.trim().to_string(),
                option1: q.option1.trim().to_string(),
                option2: q.option2.trim().to_string(),
                option3: q.option3.trim().to_string(),
                option4: q.option4.trim().to_string(),
                correct_option: q.correct_option,
            };

            q.validate()
                .map_err(|e| AppError::BadRequest(format!("Invalid question at index {}: {}", i, e)))?;

            Ok(q)
        })
        .collect()
}

/// Attaches a batch of questions to a quiz.
///
/// * `questions` must be a JSON array.
/// * Each question needs non-blank text, four non-blank options and a
///   `correct_option` in 0..=3.
/// * Inserts run in a single transaction: either every row lands or none.
#[utoipa::path(
    post,
    path = "/api/quiz/{quiz_id}/questions",
    tag = "Questions",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    request_body = AddQuestionsRequest,
    responses(
        (status = 201, description = "Questions added", body = QuestionsAdded),
        (status = 400, description = "Payload is not an array or a question is invalid"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn add_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<AddQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let items = payload
        .questions
        .as_ref()
        .and_then(Value::as_array)
        .ok_or(AppError::BadRequest("Questions must be an array".to_string()))?;

    let questions = parse_questions(items)?;

    fetch_quiz(&pool, quiz_id).await?;

    let mut tx = pool.begin().await?;

    for q in &questions {
        sqlx::query(
            r#"
            INSERT INTO questions (quiz_id, text, option1, option2, option3, option4, correct_option)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quiz_id)
        .bind(&q.text)
        .bind(&q.option1)
        .bind(&q.option2)
        .bind(&q.option3)
        .bind(&q.option4)
        .bind(q.correct_option)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question for quiz {}: {:?}", quiz_id, e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    tx.commit().await?;

    tracing::info!(quiz_id, count = questions.len(), "Questions attached");

    Ok((
        StatusCode::CREATED,
        Json(QuestionsAdded {
            message: "Questions added successfully".to_string(),
            count: questions.len(),
        }),
    ))
}

/// Returns a quiz's questions without their correct answers.
#[utoipa::path(
    get,
    path = "/api/quiz/{quiz_id}/questions",
    tag = "Questions",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    responses((status = 200, description = "Answer-stripped questions", body = Vec<PublicQuestion>))
)]
pub async fn get_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, PublicQuestion>(
        r#"
        SELECT id, text, option1, option2, option3, option4
        FROM questions
        WHERE quiz_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(questions))
}

/// Returns only the number of questions, for display before a quiz starts.
#[utoipa::path(
    get,
    path = "/api/quiz/safe/{quiz_id}/questions",
    tag = "Questions",
    params(("quiz_id" = i64, Path, description = "Quiz id")),
    responses((status = 200, description = "Question count", body = QuestionCount))
)]
pub async fn get_question_count(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let total_questions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count questions: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(QuestionCount { total_questions }))
}
