// src/models/attempt.rs

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents the 'quiz_attempts' table in the database.
/// Records when a user started a quiz so the time limit can be checked
/// on the server instead of trusting the client's countdown.
#[derive(Debug, Clone, FromRow)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// Whether a submission at `now` falls outside the deadline plus `grace_seconds`.
    pub fn is_expired(&self, now: DateTime<Utc>, grace_seconds: i64) -> bool {
        let grace = TimeDelta::try_seconds(grace_seconds).unwrap_or(TimeDelta::zero());
        match self.expires_at.checked_add_signed(grace) {
            Some(deadline) => now > deadline,
            None => false,
        }
    }
}

/// DTO returned when an attempt is started.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptResponse {
    pub attempt_id: String,
    pub quiz_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Seconds.
    pub time_limit: i64,
}
