//! Live capture and prediction pipeline
//!
//! This module owns the moving parts of the dashboard:
//! - `StreamSession`: frame pump (camera → detector → state + prediction)
//! - `TrainingCapture`: timed sampling loop feeding the engine's dataset
//! - `DashboardState`: the single state record every event transitions
//!
//! All concurrency is cooperative tokio tasks; the pump and the training
//! loop share only the read-mostly latest-hands snapshot.

mod config;
mod session;
mod state;
mod training;

pub use config::PipelineConfig;
pub use session::StreamSession;
pub use state::{DashboardState, GESTURE_NO_HAND, GESTURE_STANDBY};
pub use training::{TrainingCapture, TrainingError, TrainingStatus};
