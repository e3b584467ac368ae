use serde::{Deserialize, Serialize};

/// Display language selector understood by the gesture engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
}

impl Language {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }
}

/// Request body for POST /predict
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    /// One landmark list per detected hand, each point as [x, y, z]
    pub multi_landmarks: Vec<Vec<[f32; 3]>>,
    pub lang: Language,
}

/// Per-hand classification inside a predict response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub gesture: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// One confirmed sign in the engine's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    /// Server-rendered timestamp; treated as opaque by the client
    pub time: String,
}

/// Response body for POST /predict
///
/// Authoritative and complete: displayed gesture/confidence/detections/
/// sentence are overwritten wholesale from this, and history too when the
/// engine includes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub gesture: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Request body for POST /capture
#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub label: String,
    pub landmarks: Vec<[f32; 3]>,
}

/// Response body for POST /capture; the running total is owned server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub total: u32,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub engine: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Request body for POST /speak
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
}
