use anyhow::{Context, Result};
use tracing::debug;

use super::messages::{
    CaptureRequest, CaptureResponse, HealthResponse, Language, PredictRequest, PredictResponse,
    SpeakRequest,
};
use crate::landmarks::HandObservation;

/// Operations offered by the remote gesture engine
///
/// The engine is authoritative for classification, the assembled sentence,
/// sign history and the training sample total. No call here retries or
/// enforces a timeout beyond the HTTP client's defaults; callers decide
/// whether a failure is silent (predict/capture/speak) or surfaced.
#[async_trait::async_trait]
pub trait GestureService: Send + Sync {
    /// Liveness/capability probe
    async fn health(&self) -> Result<HealthResponse>;

    /// Classify all hands observed in one frame
    async fn predict(&self, hands: &[HandObservation], lang: Language) -> Result<PredictResponse>;

    /// Submit one labeled training sample; returns the engine's running total
    async fn capture(&self, label: &str, hand: &HandObservation) -> Result<u32>;

    /// Clear the engine's sentence/history accumulation
    async fn reset(&self) -> Result<()>;

    /// Ask the engine to voice text (best-effort)
    async fn speak(&self, text: &str) -> Result<()>;
}

/// HTTP client for the gesture engine
pub struct HttpGestureClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGestureClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl GestureService for HttpGestureClient {
    async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .context("Gesture engine unreachable")?
            .error_for_status()
            .context("Gesture engine health check failed")?;

        Ok(response.json().await.context("Malformed health response")?)
    }

    async fn predict(&self, hands: &[HandObservation], lang: Language) -> Result<PredictResponse> {
        let request = PredictRequest {
            multi_landmarks: hands.iter().map(HandObservation::to_wire).collect(),
            lang,
        };

        let response = self
            .http
            .post(self.url("/predict"))
            .json(&request)
            .send()
            .await
            .context("Prediction request failed")?
            .error_for_status()
            .context("Prediction request rejected")?;

        let outcome: PredictResponse =
            response.json().await.context("Malformed predict response")?;
        debug!(
            "Predicted '{}' at {:.2} over {} hand(s)",
            outcome.gesture,
            outcome.confidence,
            request.multi_landmarks.len()
        );
        Ok(outcome)
    }

    async fn capture(&self, label: &str, hand: &HandObservation) -> Result<u32> {
        let request = CaptureRequest {
            label: label.to_string(),
            landmarks: hand.to_wire(),
        };

        let response: CaptureResponse = self
            .http
            .post(self.url("/capture"))
            .json(&request)
            .send()
            .await
            .context("Capture request failed")?
            .error_for_status()
            .context("Capture request rejected")?
            .json()
            .await
            .context("Malformed capture response")?;

        Ok(response.total)
    }

    async fn reset(&self) -> Result<()> {
        self.http
            .post(self.url("/reset"))
            .send()
            .await
            .context("Reset request failed")?
            .error_for_status()
            .context("Reset request rejected")?;
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<()> {
        self.http
            .post(self.url("/speak"))
            .json(&SpeakRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .context("Speak request failed")?
            .error_for_status()
            .context("Speak request rejected")?;
        Ok(())
    }
}
