use super::state::AppState;
use crate::auth::AuthError;
use crate::engine::Language;
use crate::pipeline::{DashboardState, TrainingStatus};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub dashboard: DashboardState,
    pub training: TrainingStatus,
    pub logged_in: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct TrainingStartRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub lang: Language,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn ok(status: &str) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ActionResponse {
            status: status.to_string(),
        }),
    )
}

fn err(code: StatusCode, error: String) -> axum::response::Response {
    (code, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        dashboard: state.stream.snapshot().await,
        training: state.training.status().await,
        logged_in: state.auth.is_logged_in().await,
    })
}

/// POST /api/stream/start
/// Acquire the camera and start the frame pump
pub async fn start_stream(State(state): State<AppState>) -> impl IntoResponse {
    let detector = match state.build_detector().await {
        Ok(detector) => detector,
        Err(e) => {
            error!("Failed to build detector: {:#}", e);
            return err(StatusCode::BAD_GATEWAY, format!("{:#}", e));
        }
    };

    match state.stream.start(state.camera_source.clone(), detector).await {
        Ok(()) => ok("streaming").into_response(),
        Err(e) => {
            // Device acquisition denial lands here; the stream stays idle.
            error!("Failed to start stream: {:#}", e);
            err(StatusCode::BAD_GATEWAY, format!("{:#}", e))
        }
    }
}

/// POST /api/stream/stop
pub async fn stop_stream(State(state): State<AppState>) -> impl IntoResponse {
    state.stream.stop().await;
    ok("stopped")
}

/// POST /api/training/start
pub async fn start_training(
    State(state): State<AppState>,
    Json(req): Json<TrainingStartRequest>,
) -> impl IntoResponse {
    match state.training.start(&req.label).await {
        Ok(()) => ok("capturing").into_response(),
        Err(e) => err(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

/// POST /api/training/stop
pub async fn stop_training(State(state): State<AppState>) -> impl IntoResponse {
    state.training.stop().await;
    ok("stopped")
}

/// POST /api/training/close
/// Leaving the training view always stops capture and clears its state
pub async fn close_training(State(state): State<AppState>) -> impl IntoResponse {
    state.training.close().await;
    ok("closed")
}

/// POST /api/language
pub async fn set_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> impl IntoResponse {
    state.stream.state().write().await.set_language(req.lang);
    info!("Display language set to {}", req.lang.as_wire());
    ok("ok")
}

/// POST /api/sentence/speak
/// Ask the engine to voice the current sentence; best-effort
pub async fn speak_sentence(State(state): State<AppState>) -> impl IntoResponse {
    let sentence = state.stream.snapshot().await.sentence;
    if sentence.is_empty() {
        return ok("idle");
    }

    let service = Arc::clone(&state.service);
    tokio::spawn(async move {
        if let Err(e) = service.speak(&sentence).await {
            warn!("Speak request failed: {}", e);
        }
    });

    ok("speaking")
}

/// POST /api/sentence/reset
/// Clear the engine's accumulation, then the local sentence/history
pub async fn reset_sentence(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.service.reset().await {
        // Local state clears regardless, matching the dashboard's behavior.
        warn!("Engine reset failed: {}", e);
    }
    state.stream.state().write().await.apply_sentence_reset();
    ok("reset")
}

/// GET /api/export
/// The sign history as a downloadable plain-text log, one entry per line
pub async fn export_log(State(state): State<AppState>) -> impl IntoResponse {
    let log = state.stream.snapshot().await.history_log();
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"signsync_log.txt\"",
            ),
        ],
        log,
    )
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    match state.auth.login(&req.email, &req.password).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => auth_error(e),
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> impl IntoResponse {
    match state.auth.register(&req.email, &req.password).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => auth_error(e),
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.auth.logout().await;
    ok("logged_out")
}

/// GET /api/profile
/// Forwards the stored token to the auth service's protected endpoint
pub async fn get_profile(State(state): State<AppState>) -> impl IntoResponse {
    match state.auth.profile().await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => auth_error(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn auth_error(e: AuthError) -> axum::response::Response {
    let code = match e {
        AuthError::Transport(_) => StatusCode::BAD_GATEWAY,
        AuthError::Service(_) | AuthError::NotLoggedIn => StatusCode::UNAUTHORIZED,
    };
    err(code, e.to_string())
}
