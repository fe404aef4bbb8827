// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::error::AppError;

/// Liveness probe. Also confirms the store answers a trivial query.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "Service and store are up"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn health_check(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
