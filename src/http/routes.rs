use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing page and health check
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        // Analysis and export
        .route("/upload", post(handlers::upload))
        .route("/download_word", post(handlers::download_word))
        // Uploads are capped before handler logic runs
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
