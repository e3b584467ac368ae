use anyhow::{bail, Context, Result};
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::camera::CameraSource;
use crate::config::DetectorConfig;
use crate::engine::GestureService;
use crate::landmarks::{LandmarkDetector, MediaPipeDetector, ScriptedDetector};
use crate::pipeline::{StreamSession, TrainingCapture};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The live capture/prediction stream
    pub stream: Arc<StreamSession>,

    /// Training capture workflow
    pub training: Arc<TrainingCapture>,

    /// Session/auth store
    pub auth: Arc<SessionStore>,

    /// Remote gesture engine (sentence speak/reset go straight through)
    pub service: Arc<dyn GestureService>,

    /// Video source used when the stream starts
    pub camera_source: CameraSource,

    /// How to construct the landmark detector per stream start
    pub detector: DetectorConfig,
}

impl AppState {
    /// Build a fresh detector instance for a stream start
    pub async fn build_detector(&self) -> Result<Box<dyn LandmarkDetector>> {
        match self.detector.kind.as_str() {
            "mediapipe" => {
                let detector =
                    MediaPipeDetector::spawn(&self.detector.interpreter, &self.detector.script)
                        .await
                        .context("Failed to start landmark detector")?;
                Ok(Box::new(detector))
            }
            "scripted" => Ok(Box::new(ScriptedDetector::empty())),
            other => bail!("Unknown detector kind: {}", other),
        }
    }
}
