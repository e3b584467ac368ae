use anyhow::Result;
use tokio::sync::mpsc;

/// One captured video frame (RGB24, row-major)
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Raw pixel data, 3 bytes per pixel
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for a camera backend
///
/// Width/height/fps are a request, not a guarantee; the device may deliver
/// the nearest mode it supports.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 30,
        }
    }
}

/// Video capture backend trait
///
/// Implementations:
/// - Device: webcam via OpenCV VideoCapture (feature "device-camera")
/// - Synthetic: generated frames (for development/testing)
///
/// The backend is the sole owner of the capture device; nothing else in the
/// engine may start or stop it directly.
#[async_trait::async_trait]
pub trait CameraBackend: Send {
    /// Start capturing video
    ///
    /// Returns a channel receiver that will receive frames. Acquisition
    /// failure (device busy, permission denied) surfaces here and leaves
    /// the backend idle.
    async fn start(&mut self) -> Result<mpsc::Receiver<VideoFrame>>;

    /// Stop capturing and release the device
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Video source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraSource {
    /// Physical capture device by index
    Device(u32),
    /// Generated frames (no hardware required)
    Synthetic,
}

/// Camera backend factory
pub struct CameraBackendFactory;

impl CameraBackendFactory {
    /// Create a camera backend for the given source
    pub fn create(source: CameraSource, config: CameraConfig) -> Result<Box<dyn CameraBackend>> {
        match source {
            CameraSource::Device(index) => {
                #[cfg(feature = "device-camera")]
                {
                    let backend = super::device::DeviceBackend::new(index, config)?;
                    Ok(Box::new(backend))
                }

                #[cfg(not(feature = "device-camera"))]
                {
                    let _ = index;
                    anyhow::bail!(
                        "Webcam capture requires the \"device-camera\" feature (OpenCV)"
                    )
                }
            }
            CameraSource::Synthetic => {
                Ok(Box::new(super::synthetic::SyntheticBackend::new(config)))
            }
        }
    }
}
