// src/state.rs

use crate::config::Config;
use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Shared handler state. The quiz store pool is opened in `main` before the
/// router is built and closed there after shutdown; handlers only borrow it.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

/// Catalog, question and scoring handlers only need the store.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Submission reads the deadline grace period from here.
impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
