use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::{Detection, HistoryEntry, Language, PredictResponse};
use crate::landmarks::BoundingBox;

/// Gesture label shown when no stream is active
pub const GESTURE_STANDBY: &str = "STANDBY";

/// Gesture label shown while streaming with no hand in frame
pub const GESTURE_NO_HAND: &str = "NO HAND";

/// Everything the dashboard displays, as one record
///
/// All mutation goes through the transition methods below, one per event
/// class. Prediction responses race with newer frames; `applied_seq` is the
/// guard that keeps a late response from overwriting state derived from a
/// newer frame (or from a no-hand reset).
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    /// Whether the frame pump is running
    pub streaming: bool,
    /// Whether the last health probe succeeded
    pub connected: bool,
    /// Engine name reported by the last successful health probe
    pub engine: Option<String>,
    /// Display language for predictions
    pub language: Language,
    /// Best gesture across hands in the last applied prediction
    pub gesture: String,
    /// Confidence of that gesture, [0, 1]
    pub confidence: f32,
    /// Sentence assembled server-side
    pub sentence: String,
    /// Per-hand gesture labels from the last applied prediction
    pub detections: Vec<Detection>,
    /// One padded box per hand, updated every frame
    pub boxes: Vec<BoundingBox>,
    /// Confirmed sign history, server-accumulated
    pub history: Vec<HistoryEntry>,
    /// Frames processed per second, observed over the last window
    pub fps: u32,
    /// When the current stream started
    pub stream_started_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    applied_seq: u64,
}

impl DashboardState {
    pub fn new(language: Language) -> Self {
        Self {
            streaming: false,
            connected: false,
            engine: None,
            language,
            gesture: GESTURE_STANDBY.to_string(),
            confidence: 0.0,
            sentence: String::new(),
            detections: Vec::new(),
            boxes: Vec::new(),
            history: Vec::new(),
            fps: 0,
            stream_started_at: None,
            applied_seq: 0,
        }
    }

    /// The stream came up
    pub fn begin_stream(&mut self) {
        self.streaming = true;
        self.stream_started_at = Some(Utc::now());
    }

    /// The stream went down: drop every frame-derived value in one step
    ///
    /// `last_seq` is the highest frame sequence number the pump handed out;
    /// advancing the guard past it discards any prediction still in flight.
    /// Sentence and history survive a stop, matching a dashboard that keeps
    /// its transcript visible until an explicit reset.
    pub fn finish_stream(&mut self, last_seq: u64) {
        self.streaming = false;
        self.gesture = GESTURE_STANDBY.to_string();
        self.confidence = 0.0;
        self.boxes.clear();
        self.detections.clear();
        self.fps = 0;
        self.stream_started_at = None;
        self.applied_seq = last_seq;
    }

    /// A frame with no visible hand
    ///
    /// Resets to the sentinel immediately and advances the guard so that a
    /// response still in flight for an earlier frame cannot resurrect a
    /// gesture nobody is making.
    pub fn observe_empty_frame(&mut self, seq: u64) {
        self.gesture = GESTURE_NO_HAND.to_string();
        self.confidence = 0.0;
        self.boxes.clear();
        self.applied_seq = self.applied_seq.max(seq);
    }

    /// A frame with hands: boxes update immediately, ahead of any prediction
    pub fn observe_hands(&mut self, boxes: Vec<BoundingBox>) {
        self.boxes = boxes;
    }

    /// A prediction response came back for frame `seq`
    ///
    /// Returns false if the response is not newer than what is already
    /// applied and was dropped. Frame numbers start at 1, so the first
    /// response always lands.
    pub fn apply_prediction(&mut self, seq: u64, outcome: PredictResponse) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;

        self.gesture = if outcome.gesture.is_empty() {
            "UNKNOWN".to_string()
        } else {
            outcome.gesture
        };
        self.confidence = outcome.confidence;
        self.detections = outcome.detections;
        self.sentence = outcome.sentence;
        if let Some(history) = outcome.history {
            self.history = history;
        }
        true
    }

    /// A frame-rate measurement window closed
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    /// A health probe completed
    pub fn set_connectivity(&mut self, connected: bool, engine: Option<String>) {
        self.connected = connected;
        self.engine = engine;
    }

    /// The user cleared the sentence (server-side accumulation was reset)
    pub fn apply_sentence_reset(&mut self) {
        self.sentence.clear();
        self.history.clear();
        self.gesture = GESTURE_STANDBY.to_string();
    }

    /// The user switched display language
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The export-log artifact: history texts, one per line
    pub fn history_log(&self) -> String {
        self.history
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Language::English)
    }
}
