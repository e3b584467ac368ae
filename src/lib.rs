pub mod auth;
pub mod camera;
pub mod config;
pub mod engine;
pub mod http;
pub mod landmarks;
pub mod pipeline;

pub use auth::{AuthApi, AuthError, HttpAuthClient, Session, SessionStore, UserIdentity};
pub use camera::{
    CameraBackend, CameraBackendFactory, CameraConfig, CameraSource, SyntheticBackend, VideoFrame,
};
pub use config::Config;
pub use engine::{GestureService, HealthMonitor, HttpGestureClient, Language, PredictResponse};
pub use http::{create_router, AppState};
pub use landmarks::{
    BoundingBox, HandObservation, Landmark, LandmarkDetector, MediaPipeDetector, ScriptedDetector,
};
pub use pipeline::{
    DashboardState, PipelineConfig, StreamSession, TrainingCapture, TrainingError, TrainingStatus,
    GESTURE_NO_HAND, GESTURE_STANDBY,
};
