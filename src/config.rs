// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Default quiz duration when the creator does not provide one (30 minutes).
pub const DEFAULT_TIME_LIMIT_SECONDS: i64 = 1800;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Allowed CORS origins. `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Slack added to an attempt's deadline before a submission is rejected.
    pub submit_grace_seconds: i64,
    pub seed_sample_quiz: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quiz.db?mode=rwc".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9001);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS").ok().and_then(|v| parse_origins(&v));

        let submit_grace_seconds = env::var("SUBMIT_GRACE_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v >= 0)
            .unwrap_or(30);

        let seed_sample_quiz = env::var("SEED_SAMPLE_QUIZ")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            database_url,
            port,
            rust_log,
            cors_origins,
            submit_grace_seconds,
            seed_sample_quiz,
        }
    }
}

/// Splits a comma-separated origin list. Empty or `*` means "any origin".
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        None
    } else {
        Some(origins)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
