// Integration tests for the training capture loop state machine.

mod common;

use common::{sample_hand, CaptureStep, MockGestureService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use signsync::landmarks::HandObservation;
use signsync::{PipelineConfig, TrainingCapture, TrainingError};

struct Fixture {
    service: Arc<MockGestureService>,
    hands: Arc<RwLock<Vec<HandObservation>>>,
    streaming: Arc<AtomicBool>,
    training: TrainingCapture,
}

fn fixture(target: u32) -> Fixture {
    let config = PipelineConfig {
        capture_interval: Duration::from_millis(5),
        capture_target: target,
        ..PipelineConfig::default()
    };
    let service = Arc::new(MockGestureService::new());
    let hands = Arc::new(RwLock::new(vec![sample_hand()]));
    let streaming = Arc::new(AtomicBool::new(true));
    let training = TrainingCapture::new(
        &config,
        service.clone(),
        Arc::clone(&hands),
        Arc::clone(&streaming),
    );
    Fixture {
        service,
        hands,
        streaming,
        training,
    }
}

#[tokio::test]
async fn test_empty_label_is_refused_before_any_network_call() {
    let f = fixture(30);

    let result = f.training.start("   ").await;
    assert_eq!(result, Err(TrainingError::EmptyLabel));

    let status = f.training.status().await;
    assert!(!status.active, "refused start must leave the loop idle");
    assert_eq!(f.service.capture_count(), 0);
}

#[tokio::test]
async fn test_start_without_camera_is_refused() {
    let f = fixture(30);
    f.streaming.store(false, Ordering::SeqCst);

    let result = f.training.start("WATER").await;
    assert_eq!(result, Err(TrainingError::CameraNotRunning));
    assert!(!f.training.status().await.active);
    assert_eq!(f.service.capture_count(), 0);
}

#[tokio::test]
async fn test_label_is_normalized() {
    let f = fixture(30);
    f.service.push_capture(CaptureStep::Total(1));

    f.training.start("  water ").await.expect("start should succeed");
    tokio::time::sleep(Duration::from_millis(40)).await;

    assert_eq!(f.training.status().await.label, "WATER");
    f.training.stop().await;
}

#[tokio::test]
async fn test_reaching_the_target_stops_the_loop() {
    let target = 30;
    let f = fixture(target);
    for total in 1..=target {
        f.service.push_capture(CaptureStep::Total(total));
    }

    f.training.start("HELLO").await.expect("start should succeed");

    tokio::time::sleep(Duration::from_millis(600)).await;

    let status = f.training.status().await;
    assert!(!status.active, "loop must turn itself off at the target");
    assert_eq!(status.samples, target);
    assert_eq!(f.service.capture_count(), target);

    // No further ticks after completion
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(f.service.capture_count(), target);
}

#[tokio::test]
async fn test_failed_capture_is_skipped_and_the_loop_continues() {
    let f = fixture(30);
    f.service.push_capture(CaptureStep::Total(1));
    f.service.push_capture(CaptureStep::Fail);
    f.service.push_capture(CaptureStep::Total(2));

    f.training.start("HELLO").await.expect("start should succeed");
    tokio::time::sleep(Duration::from_millis(100)).await;
    f.training.stop().await;

    let status = f.training.status().await;
    assert_eq!(status.samples, 2, "the failed tick must not reset the total");
    assert!(f.service.capture_count() >= 3);
}

#[tokio::test]
async fn test_no_hand_ticks_send_nothing() {
    let f = fixture(30);
    f.hands.write().await.clear();

    f.training.start("HELLO").await.expect("start should succeed");
    tokio::time::sleep(Duration::from_millis(60)).await;
    f.training.stop().await;

    assert_eq!(f.service.capture_count(), 0, "no tracked hand means no samples");
}

#[tokio::test]
async fn test_manual_stop_then_restart_continues_the_service_total() {
    let f = fixture(30);
    f.service.push_capture(CaptureStep::Total(11));
    f.service.push_capture(CaptureStep::Total(12));

    f.training.start("HELLO").await.expect("start should succeed");
    tokio::time::sleep(Duration::from_millis(30)).await;
    f.training.stop().await;

    let stopped = f.training.status().await;
    assert!(!stopped.active);
    let before_restart = stopped.samples;
    assert!(before_restart >= 11);

    // The service-side total persists across a manual stop; the next run's
    // displayed count picks up from whatever the service echoes.
    f.service.push_capture(CaptureStep::Total(before_restart + 1));
    f.training.start("HELLO").await.expect("restart should succeed");
    tokio::time::sleep(Duration::from_millis(30)).await;
    f.training.stop().await;

    assert_eq!(f.training.status().await.samples, before_restart + 1);
}

#[tokio::test]
async fn test_close_always_clears_label_and_count() {
    let f = fixture(30);
    f.service.push_capture(CaptureStep::Total(7));

    f.training.start("HELLO").await.expect("start should succeed");
    tokio::time::sleep(Duration::from_millis(30)).await;

    f.training.close().await;

    let status = f.training.status().await;
    assert!(!status.active);
    assert!(status.label.is_empty());
    assert_eq!(status.samples, 0);

    // Closing an already-idle workflow is also fine
    f.training.close().await;
    assert!(!f.training.status().await.active);
}

#[tokio::test]
async fn test_redundant_start_is_ignored_while_active() {
    let f = fixture(30);
    f.service.push_capture(CaptureStep::Total(1));

    f.training.start("HELLO").await.expect("start should succeed");
    f.training
        .start("WORLD")
        .await
        .expect("second start should be a no-op");

    assert_eq!(
        f.training.status().await.label,
        "HELLO",
        "an active run keeps its label"
    );
    f.training.stop().await;
}
