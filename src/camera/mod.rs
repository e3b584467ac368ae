pub mod backend;
pub mod synthetic;

#[cfg(feature = "device-camera")]
pub mod device;

pub use backend::{CameraBackend, CameraBackendFactory, CameraConfig, CameraSource, VideoFrame};
pub use synthetic::SyntheticBackend;
