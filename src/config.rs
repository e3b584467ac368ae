use anyhow::{bail, Result};
use serde::Deserialize;

use crate::camera::{CameraConfig, CameraSource};
use crate::engine::Language;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub auth: AuthConfig,
    pub camera: CameraSection,
    pub detector: DetectorConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    /// Gesture engine base URL
    pub base_url: String,
    /// Seconds between health probes
    pub health_interval_secs: u64,
    /// Default display language ("en" or "ta")
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Auth service base URL
    pub base_url: String,
    /// Session file override; platform data dir when absent
    pub session_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CameraSection {
    /// "device" or "synthetic"
    pub source: String,
    pub device_index: u32,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
}

impl CameraSection {
    pub fn source(&self) -> Result<CameraSource> {
        match self.source.as_str() {
            "device" => Ok(CameraSource::Device(self.device_index)),
            "synthetic" => Ok(CameraSource::Synthetic),
            other => bail!("Unknown camera source: {}", other),
        }
    }

    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            width: self.width,
            height: self.height,
            frame_rate: self.frame_rate,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    /// "mediapipe" or "scripted"
    pub kind: String,
    /// Interpreter for the landmark helper (mediapipe kind)
    pub interpreter: String,
    /// Path to the landmark helper script (mediapipe kind)
    pub script: String,
}

#[derive(Debug, Deserialize)]
pub struct TrainingConfig {
    /// Milliseconds between capture ticks
    pub interval_ms: u64,
    /// Sample total at which a capture run completes
    pub target_samples: u32,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
