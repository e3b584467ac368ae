// Unit tests for the dashboard state record and its transitions,
// in particular the stale-response guard on prediction application.

use signsync::engine::{Detection, HistoryEntry, Language, PredictResponse};
use signsync::landmarks::BoundingBox;
use signsync::{DashboardState, GESTURE_NO_HAND, GESTURE_STANDBY};

fn response(gesture: &str, confidence: f32, sentence: &str) -> PredictResponse {
    PredictResponse {
        gesture: gesture.to_string(),
        confidence,
        detections: vec![Detection {
            gesture: gesture.to_string(),
            confidence: Some(confidence),
        }],
        sentence: sentence.to_string(),
        history: None,
    }
}

#[test]
fn test_initial_state_is_standby() {
    let state = DashboardState::default();
    assert_eq!(state.gesture, GESTURE_STANDBY);
    assert_eq!(state.confidence, 0.0);
    assert!(!state.streaming);
    assert!(state.boxes.is_empty());
}

#[test]
fn test_prediction_overwrites_wholesale() {
    let mut state = DashboardState::default();
    state.apply_prediction(1, response("STOP", 0.70, "STOP"));

    // The documented scenario: HELLO at 0.92 replaces STOP at 0.70 literally
    let applied = state.apply_prediction(2, response("HELLO", 0.92, "HELLO"));
    assert!(applied);
    assert_eq!(state.gesture, "HELLO");
    assert!((state.confidence - 0.92).abs() < 1e-6);
    assert_eq!(state.sentence, "HELLO");
}

#[test]
fn test_stale_prediction_is_dropped() {
    let mut state = DashboardState::default();

    // Frame 6's response lands first, then frame 5's limps in late
    assert!(state.apply_prediction(6, response("HELLO", 0.92, "HELLO")));
    assert!(!state.apply_prediction(5, response("STOP", 0.80, "STOP")));

    assert_eq!(state.gesture, "HELLO");
    assert!((state.confidence - 0.92).abs() < 1e-6);
}

#[test]
fn test_empty_frame_resets_and_blocks_in_flight_responses() {
    let mut state = DashboardState::default();
    state.observe_hands(vec![BoundingBox {
        x: 0.1,
        y: 0.1,
        w: 0.3,
        h: 0.3,
    }]);
    state.apply_prediction(3, response("YES", 0.85, "YES"));

    state.observe_empty_frame(7);
    assert_eq!(state.gesture, GESTURE_NO_HAND);
    assert_eq!(state.confidence, 0.0);
    assert!(state.boxes.is_empty());

    // A response for frame 5 was still in flight; it must not resurrect YES
    assert!(!state.apply_prediction(5, response("YES", 0.85, "YES")));
    assert_eq!(state.gesture, GESTURE_NO_HAND);
}

#[test]
fn test_history_replaced_only_when_present() {
    let mut state = DashboardState::default();

    let mut with_history = response("HELLO", 0.9, "HELLO");
    with_history.history = Some(vec![HistoryEntry {
        text: "HELLO".to_string(),
        time: "Just now".to_string(),
    }]);
    state.apply_prediction(1, with_history);
    assert_eq!(state.history.len(), 1);

    // Next response omits history; the previous one stays
    state.apply_prediction(2, response("YES", 0.8, "HELLO YES"));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].text, "HELLO");
}

#[test]
fn test_finish_stream_resets_derived_values() {
    let mut state = DashboardState::default();
    state.begin_stream();
    state.observe_hands(vec![BoundingBox::default()]);
    state.apply_prediction(4, response("YES", 0.7, "YES"));
    state.set_fps(27);

    state.finish_stream(4);

    assert!(!state.streaming);
    assert_eq!(state.gesture, GESTURE_STANDBY);
    assert_eq!(state.confidence, 0.0);
    assert!(state.boxes.is_empty());
    assert!(state.detections.is_empty());
    assert_eq!(state.fps, 0);
    // Sentence survives a stop; only an explicit reset clears it
    assert_eq!(state.sentence, "YES");

    // A prediction still in flight when the stream stopped is dropped
    assert!(!state.apply_prediction(4, response("YES", 0.7, "YES")));
    assert_eq!(state.gesture, GESTURE_STANDBY);
}

#[test]
fn test_sentence_reset_clears_transcript() {
    let mut state = DashboardState::default();
    let mut outcome = response("HELLO", 0.9, "HELLO");
    outcome.history = Some(vec![HistoryEntry {
        text: "HELLO".to_string(),
        time: "Just now".to_string(),
    }]);
    state.apply_prediction(1, outcome);

    state.apply_sentence_reset();

    assert!(state.sentence.is_empty());
    assert!(state.history.is_empty());
    assert_eq!(state.gesture, GESTURE_STANDBY);
}

#[test]
fn test_language_switch() {
    let mut state = DashboardState::default();
    assert_eq!(state.language, Language::English);
    state.set_language(Language::Tamil);
    assert_eq!(state.language, Language::Tamil);
}

#[test]
fn test_history_log_renders_one_text_per_line() {
    let mut state = DashboardState::default();
    let mut outcome = response("WATER", 0.9, "HELLO WATER");
    outcome.history = Some(vec![
        HistoryEntry {
            text: "HELLO".to_string(),
            time: "Just now".to_string(),
        },
        HistoryEntry {
            text: "WATER".to_string(),
            time: "Just now".to_string(),
        },
    ]);
    state.apply_prediction(1, outcome);

    assert_eq!(state.history_log(), "HELLO\nWATER");
}

#[test]
fn test_history_log_empty_history() {
    let state = DashboardState::default();
    assert_eq!(state.history_log(), "");
}
