// Scripted collaborator doubles shared across the integration tests.
// Each test binary uses a subset of these.
#![allow(dead_code)]

use anyhow::{bail, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use signsync::engine::{HealthResponse, Language, PredictResponse};
use signsync::landmarks::{HandObservation, Landmark};
use signsync::GestureService;

/// One scripted outcome for a predict call
#[derive(Clone)]
pub enum PredictStep {
    Respond(PredictResponse),
    Fail,
}

/// One scripted outcome for a capture call
pub enum CaptureStep {
    Total(u32),
    Fail,
}

/// Gesture engine double: replays scripted outcomes and counts calls
#[derive(Default)]
pub struct MockGestureService {
    pub predict_calls: AtomicU32,
    pub capture_calls: AtomicU32,
    predict_queue: Mutex<VecDeque<PredictStep>>,
    default_predict: Mutex<Option<PredictStep>>,
    capture_queue: Mutex<VecDeque<CaptureStep>>,
}

impl MockGestureService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_predict(&self, step: PredictStep) {
        self.predict_queue.lock().unwrap().push_back(step);
    }

    /// Outcome used for predict calls once the queue is exhausted
    pub fn set_default_predict(&self, response: PredictResponse) {
        *self.default_predict.lock().unwrap() = Some(PredictStep::Respond(response));
    }

    /// Fail every predict call once the queue is exhausted
    pub fn set_default_predict_failure(&self) {
        *self.default_predict.lock().unwrap() = Some(PredictStep::Fail);
    }

    pub fn push_capture(&self, step: CaptureStep) {
        self.capture_queue.lock().unwrap().push_back(step);
    }

    pub fn predict_count(&self) -> u32 {
        self.predict_calls.load(Ordering::SeqCst)
    }

    pub fn capture_count(&self) -> u32 {
        self.capture_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GestureService for MockGestureService {
    async fn health(&self) -> Result<HealthResponse> {
        Ok(HealthResponse {
            engine: "Mock".to_string(),
            status: Some("online".to_string()),
            classes: Vec::new(),
        })
    }

    async fn predict(
        &self,
        _hands: &[HandObservation],
        _lang: Language,
    ) -> Result<PredictResponse> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);

        let step = self.predict_queue.lock().unwrap().pop_front();
        let step = step.or_else(|| self.default_predict.lock().unwrap().clone());
        match step {
            Some(PredictStep::Respond(response)) => Ok(response),
            Some(PredictStep::Fail) => bail!("scripted network failure"),
            None => bail!("unscripted predict call"),
        }
    }

    async fn capture(&self, _label: &str, _hand: &HandObservation) -> Result<u32> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);

        let step = self.capture_queue.lock().unwrap().pop_front();
        match step {
            Some(CaptureStep::Total(total)) => Ok(total),
            Some(CaptureStep::Fail) => bail!("scripted network failure"),
            None => bail!("unscripted capture call"),
        }
    }

    async fn reset(&self) -> Result<()> {
        Ok(())
    }

    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// A plausible one-hand observation centered in the frame
pub fn sample_hand() -> HandObservation {
    HandObservation::new(vec![
        Landmark::new(0.40, 0.50, 0.00),
        Landmark::new(0.45, 0.42, -0.01),
        Landmark::new(0.50, 0.38, -0.02),
        Landmark::new(0.55, 0.35, -0.02),
        Landmark::new(0.58, 0.33, -0.03),
        Landmark::new(0.48, 0.30, -0.01),
        Landmark::new(0.49, 0.24, -0.02),
        Landmark::new(0.50, 0.20, -0.03),
        Landmark::new(0.51, 0.17, -0.03),
    ])
}

/// A response the engine could plausibly return
pub fn predict_response(gesture: &str, confidence: f32, sentence: &str) -> PredictResponse {
    PredictResponse {
        gesture: gesture.to_string(),
        confidence,
        detections: Vec::new(),
        sentence: sentence.to_string(),
        history: None,
    }
}
