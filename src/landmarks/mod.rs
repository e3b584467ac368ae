//! Hand landmark types and detector abstraction
//!
//! A detector turns one video frame into zero or more hand observations
//! (ordered landmark points in normalized image coordinates). The pipeline
//! never runs inference itself; detectors are injected so the whole engine
//! can be driven without a camera or a real model.

pub mod detector;
pub mod mediapipe;
pub mod types;

pub use detector::{LandmarkDetector, ScriptedDetector};
pub use mediapipe::MediaPipeDetector;
pub use types::{BoundingBox, HandObservation, Landmark};
