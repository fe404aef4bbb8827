// src/db.rs

use std::str::FromStr;

use chrono::Utc;
use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Opens the SQLite pool. Foreign keys are enforced so deleting a quiz
/// cascades to its questions and attempts.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(3))
        .connect_with(options)
        .await
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// (text, options, 0-based correct option)
const SAMPLE_QUESTIONS: [(&str, [&str; 4], i64); 2] = [
    (
        "What is the capital of France?",
        ["London", "Berlin", "Paris", "Madrid"],
        2,
    ),
    (
        "Which planet is known as the Red Planet?",
        ["Venus", "Jupiter", "Mars", "Saturn"],
        2,
    ),
];

/// Seeds a sample quiz when the store holds no quizzes yet.
/// Returns the new quiz id, or `None` if nothing was seeded.
pub async fn seed_sample_quiz(pool: &SqlitePool) -> Result<Option<i64>, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Ok(None);
    }

    let mut tx = pool.begin().await?;

    let quiz_id = sqlx::query(
        "INSERT INTO quizzes (title, description, time_limit, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind("Sample Quiz")
    .bind("A couple of general knowledge questions")
    .bind(crate::config::DEFAULT_TIME_LIMIT_SECONDS)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for (text, [o1, o2, o3, o4], correct_option) in SAMPLE_QUESTIONS {
        sqlx::query(
            r#"
            INSERT INTO questions (quiz_id, text, option1, option2, option3, option4, correct_option)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quiz_id)
        .bind(text)
        .bind(o1)
        .bind(o2)
        .bind(o3)
        .bind(o4)
        .bind(correct_option)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Some(quiz_id))
}
