//! HTTP control API (the seam the dashboard UI attaches to)
//!
//! This module provides a REST API over the engine:
//! - GET  /health - local liveness
//! - GET  /api/status - dashboard + training + session snapshot
//! - POST /api/stream/start, /api/stream/stop - frame pump control
//! - POST /api/training/start, /stop, /close - training capture workflow
//! - POST /api/language - display language switch
//! - POST /api/sentence/speak, /api/sentence/reset - sentence actions
//! - GET  /api/export - sign history as a downloadable text log
//! - POST /api/auth/login, /register, /logout; GET /api/profile

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
