use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::PipelineConfig;
use crate::engine::GestureService;
use crate::landmarks::HandObservation;

/// Why a training capture run could not start
///
/// Both are user-visible messages, refused before any network call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrainingError {
    #[error("Enter a gesture label before capturing")]
    EmptyLabel,
    #[error("Start the camera before capturing")]
    CameraNotRunning,
}

/// Displayed state of the training capture workflow
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingStatus {
    /// Whether a capture run is in progress
    pub active: bool,
    /// Normalized label samples are being collected under
    pub label: String,
    /// Running total as last echoed by the capture service
    pub samples: u32,
    /// Total at which the run completes on its own
    pub target: u32,
}

/// Timed sampling loop that feeds labeled hand observations to the engine
///
/// While capturing, every tick sends the first currently-tracked hand to the
/// capture service under the user's label. The service owns the running
/// total; reaching the target ends the run automatically. The loop reads the
/// same latest-hands snapshot the frame pump writes; no further coordination
/// is needed since this side only reads.
pub struct TrainingCapture {
    service: Arc<dyn GestureService>,
    latest_hands: Arc<RwLock<Vec<HandObservation>>>,
    streaming: Arc<AtomicBool>,
    interval: Duration,
    target: u32,
    status: Arc<RwLock<TrainingStatus>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TrainingCapture {
    pub fn new(
        config: &PipelineConfig,
        service: Arc<dyn GestureService>,
        latest_hands: Arc<RwLock<Vec<HandObservation>>>,
        streaming: Arc<AtomicBool>,
    ) -> Self {
        Self {
            service,
            latest_hands,
            streaming,
            interval: config.capture_interval,
            target: config.capture_target,
            status: Arc::new(RwLock::new(TrainingStatus {
                target: config.capture_target,
                ..TrainingStatus::default()
            })),
            task: Mutex::new(None),
        }
    }

    pub async fn status(&self) -> TrainingStatus {
        self.status.read().await.clone()
    }

    /// Begin a capture run for `label`
    ///
    /// The label is trimmed and uppercased. Refuses (without contacting the
    /// service) when the label is empty or the camera is not running; a run
    /// already in progress is left alone.
    pub async fn start(&self, label: &str) -> Result<(), TrainingError> {
        let label = label.trim().to_uppercase();
        if label.is_empty() {
            return Err(TrainingError::EmptyLabel);
        }
        if !self.streaming.load(Ordering::SeqCst) {
            return Err(TrainingError::CameraNotRunning);
        }

        {
            let mut status = self.status.write().await;
            if status.active {
                warn!("Training capture already active");
                return Ok(());
            }
            status.active = true;
            status.label = label.clone();
            status.samples = 0;
        }

        info!("Training capture started for '{}'", label);

        let service = Arc::clone(&self.service);
        let latest_hands = Arc::clone(&self.latest_hands);
        let status = Arc::clone(&self.status);
        let interval = self.interval;
        let target = self.target;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if !status.read().await.active {
                    break;
                }

                // First tracked hand this tick, if any
                let hand = latest_hands.read().await.first().cloned();
                let Some(hand) = hand else { continue };

                match service.capture(&label, &hand).await {
                    Ok(total) => {
                        let mut status = status.write().await;
                        status.samples = total;
                        if total >= target {
                            status.active = false;
                            info!("Training capture complete: {} samples for '{}'", total, label);
                            break;
                        }
                    }
                    Err(e) => {
                        // Skip this sample; the loop continues on the next tick.
                        warn!("Capture request failed: {}", e);
                    }
                }
            }
        });

        *self.task.lock().await = Some(task);
        Ok(())
    }

    /// Cancel the capture run
    ///
    /// The timer stops immediately; an in-flight capture request is neither
    /// awaited nor cancelled.
    pub async fn stop(&self) {
        let was_active = {
            let mut status = self.status.write().await;
            std::mem::replace(&mut status.active, false)
        };

        if let Some(task) = self.task.lock().await.take() {
            task.abort();
        }

        if was_active {
            info!("Training capture stopped");
        }
    }

    /// Leave the training workflow: stop capturing and clear label/count
    ///
    /// Called on every exit path from the surrounding view, so state never
    /// leaks into the next visit.
    pub async fn close(&self) {
        self.stop().await;
        let mut status = self.status.write().await;
        status.label.clear();
        status.samples = 0;
    }
}
