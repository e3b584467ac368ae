use std::time::Duration;

use crate::camera::CameraConfig;
use crate::engine::Language;

/// Tunables for one live pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Resolution/frame-rate request passed to the capture device
    pub camera: CameraConfig,

    /// Display language sent with every prediction
    pub language: Language,

    /// Delay between training capture ticks
    /// Default: 200ms (5 samples/sec)
    pub capture_interval: Duration,

    /// Sample total at which a training capture run completes
    pub capture_target: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            language: Language::English,
            capture_interval: Duration::from_millis(200), // 5 samples/sec
            capture_target: 30,
        }
    }
}
