use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dashboard snapshot
        .route("/api/status", get(handlers::get_status))
        // Stream control
        .route("/api/stream/start", post(handlers::start_stream))
        .route("/api/stream/stop", post(handlers::stop_stream))
        // Training capture workflow
        .route("/api/training/start", post(handlers::start_training))
        .route("/api/training/stop", post(handlers::stop_training))
        .route("/api/training/close", post(handlers::close_training))
        // Sentence actions
        .route("/api/language", post(handlers::set_language))
        .route("/api/sentence/speak", post(handlers::speak_sentence))
        .route("/api/sentence/reset", post(handlers::reset_sentence))
        .route("/api/export", get(handlers::export_log))
        // Session/auth
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/profile", get(handlers::get_profile))
        // The dashboard UI is served from a different origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
