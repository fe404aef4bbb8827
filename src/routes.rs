// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, question, quiz, submission},
    openapi,
    state::AppState,
};

/// Builds the CORS layer. With no configured origins any origin is allowed.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::warn!("Ignoring invalid CORS origin {:?}: {}", o, e))
                .ok()
        })),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Quiz catalog, question and submission routes under `/api/quiz`.
/// * Health probe and the OpenAPI document.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origins.as_deref());

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/safe/{quiz_id}/questions", get(question::get_question_count))
        .route("/{quiz_id}", get(quiz::get_quiz).delete(quiz::delete_quiz))
        .route(
            "/{quiz_id}/questions",
            get(question::get_questions).post(question::add_questions),
        )
        .route("/{quiz_id}/start", post(submission::start_attempt))
        .route("/{quiz_id}/submit", post(submission::submit_quiz));

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
