// src/routes.rs

use std::any::Any;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::{
    docs,
    error::AppError,
    handlers::{health, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, leaderboard, health, docs).
/// * Applies global middleware (Trace, CORS, panic catcher).
/// * Serves the built client from `static_dir` for unmatched paths, if set.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::list_questions))
        .route("/submit", post(quiz::submit_quiz));

    let mut router = Router::new()
        .nest("/api/quiz", quiz_routes)
        .route("/api/leaderboard", get(quiz::get_leaderboard))
        .route("/api/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    if let Some(dir) = &state.config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Turns a handler panic into the same generic 500 body as other internal errors.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}
