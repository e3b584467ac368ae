use anyhow::Result;
use std::collections::VecDeque;

use super::types::HandObservation;
use crate::camera::VideoFrame;

/// Hand landmark detector
///
/// Implementations:
/// - MediaPipe: helper process running the hand landmark model
/// - Scripted: replays prepared observations (for testing/batch runs)
#[async_trait::async_trait]
pub trait LandmarkDetector: Send {
    /// Detect hands in one frame
    ///
    /// Returns one observation per detected hand, in detector order.
    /// An empty list means no hand was visible in this frame.
    async fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<HandObservation>>;

    /// Get detector name for logging
    fn name(&self) -> &str;
}

/// Detector that replays a prepared sequence of per-frame observations
///
/// Once the sequence is exhausted every further frame reports no hands.
pub struct ScriptedDetector {
    frames: VecDeque<Vec<HandObservation>>,
}

impl ScriptedDetector {
    pub fn new(frames: Vec<Vec<HandObservation>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// A detector that never sees a hand
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A detector that reports the same hands on every frame
    pub fn repeating(hands: Vec<HandObservation>, times: usize) -> Self {
        Self::new(vec![hands; times])
    }
}

#[async_trait::async_trait]
impl LandmarkDetector for ScriptedDetector {
    async fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<HandObservation>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
