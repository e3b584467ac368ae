//! Remote gesture engine client
//!
//! The engine is an external HTTP collaborator: it classifies hand
//! observations (`/predict`), accumulates labeled training samples
//! (`/capture`), owns the assembled sentence (`/reset`), voices text
//! (`/speak`) and reports liveness (`/health`). This module holds the wire
//! types, the reqwest client, and the periodic health poll.

pub mod client;
pub mod messages;
pub mod monitor;

pub use client::{GestureService, HttpGestureClient};
pub use messages::{
    CaptureRequest, CaptureResponse, Detection, HealthResponse, HistoryEntry, Language,
    PredictRequest, PredictResponse, SpeakRequest,
};
pub use monitor::HealthMonitor;
