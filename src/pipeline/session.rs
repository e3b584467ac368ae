use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::config::PipelineConfig;
use super::state::DashboardState;
use crate::camera::{CameraBackend, CameraBackendFactory, CameraSource};
use crate::engine::GestureService;
use crate::landmarks::{BoundingBox, HandObservation, LandmarkDetector};

/// A live capture-and-prediction stream
///
/// Owns the capture device exclusively and drives the frame pump: every
/// received frame goes through the landmark detector; bounding boxes are
/// published immediately, and a prediction request is dispatched without
/// waiting for the previous one to return. Observed throughput is measured
/// once per second.
pub struct StreamSession {
    config: PipelineConfig,

    /// Remote gesture engine
    service: Arc<dyn GestureService>,

    /// The one dashboard record everything transitions
    state: Arc<RwLock<DashboardState>>,

    /// Most recent frame's observations, shared read-only with the
    /// training capture loop
    latest_hands: Arc<RwLock<Vec<HandObservation>>>,

    /// Whether the pump is running
    is_streaming: Arc<AtomicBool>,

    /// Monotonically increasing frame number; prediction responses carry it
    /// back so stale ones can be dropped
    frame_seq: Arc<AtomicU64>,

    /// Capture device handle; nothing outside this session touches it
    backend: Mutex<Option<Box<dyn CameraBackend>>>,

    /// Handle for the frame pump task
    pump_task: Mutex<Option<JoinHandle<()>>>,
}

impl StreamSession {
    pub fn new(config: PipelineConfig, service: Arc<dyn GestureService>) -> Self {
        let state = DashboardState::new(config.language);
        Self {
            config,
            service,
            state: Arc::new(RwLock::new(state)),
            latest_hands: Arc::new(RwLock::new(Vec::new())),
            is_streaming: Arc::new(AtomicBool::new(false)),
            frame_seq: Arc::new(AtomicU64::new(0)),
            backend: Mutex::new(None),
            pump_task: Mutex::new(None),
        }
    }

    /// Shared dashboard record (health monitor, HTTP layer)
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    /// Shared latest-hands snapshot (training capture loop)
    pub fn latest_hands(&self) -> Arc<RwLock<Vec<HandObservation>>> {
        Arc::clone(&self.latest_hands)
    }

    /// Shared streaming flag (training capture validation)
    pub fn streaming_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.is_streaming)
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Start the stream
    ///
    /// Device acquisition failure is returned to the caller and leaves the
    /// session idle.
    pub async fn start(
        &self,
        source: CameraSource,
        mut detector: Box<dyn LandmarkDetector>,
    ) -> Result<()> {
        if self.is_streaming.load(Ordering::SeqCst) {
            warn!("Stream already started");
            return Ok(());
        }

        info!(
            "Starting stream ({:?}, detector: {})",
            source,
            detector.name()
        );

        let mut backend = CameraBackendFactory::create(source, self.config.camera.clone())
            .context("Failed to create camera backend")?;
        let mut frame_rx = backend
            .start()
            .await
            .context("Failed to start video capture")?;
        *self.backend.lock().await = Some(backend);

        self.is_streaming.store(true, Ordering::SeqCst);
        self.state.write().await.begin_stream();

        let state = Arc::clone(&self.state);
        let latest_hands = Arc::clone(&self.latest_hands);
        let is_streaming = Arc::clone(&self.is_streaming);
        let frame_seq = Arc::clone(&self.frame_seq);
        let service = Arc::clone(&self.service);

        let pump = tokio::spawn(async move {
            info!("Frame pump started");

            let mut frames_seen: u32 = 0;
            let mut window_started = Instant::now();

            while let Some(frame) = frame_rx.recv().await {
                if !is_streaming.load(Ordering::SeqCst) {
                    break;
                }

                let seq = frame_seq.fetch_add(1, Ordering::SeqCst) + 1;
                frames_seen += 1;

                match detector.detect(&frame).await {
                    Ok(hands) => {
                        *latest_hands.write().await = hands.clone();

                        if hands.is_empty() {
                            state.write().await.observe_empty_frame(seq);
                        } else {
                            let boxes: Vec<BoundingBox> =
                                hands.iter().map(BoundingBox::around).collect();
                            let mut guard = state.write().await;
                            let lang = guard.language;
                            guard.observe_hands(boxes);
                            drop(guard);

                            // Fire and forget: the pump never waits on the
                            // network before taking the next frame.
                            let service = Arc::clone(&service);
                            let state = Arc::clone(&state);
                            tokio::spawn(async move {
                                match service.predict(&hands, lang).await {
                                    Ok(outcome) => {
                                        if !state.write().await.apply_prediction(seq, outcome) {
                                            debug!("Dropped stale prediction for frame {}", seq);
                                        }
                                    }
                                    Err(e) => {
                                        // Previous displayed state stays as-is.
                                        warn!("Prediction request failed: {}", e);
                                    }
                                }
                            });
                        }
                    }
                    Err(e) => warn!("Landmark detection failed: {}", e),
                }

                let elapsed = window_started.elapsed();
                if elapsed >= Duration::from_secs(1) {
                    let fps = (frames_seen as f64 / elapsed.as_secs_f64()).round() as u32;
                    state.write().await.set_fps(fps);
                    frames_seen = 0;
                    window_started = Instant::now();
                }
            }

            info!("Frame pump stopped");
        });

        *self.pump_task.lock().await = Some(pump);

        info!("Stream started");
        Ok(())
    }

    /// Stop the stream
    ///
    /// Releases the device, waits for the pump to drain, then resets every
    /// frame-derived value under one state lock so no caller can observe a
    /// half-stopped dashboard. In-flight predictions are not awaited; the
    /// sequence guard discards their results.
    pub async fn stop(&self) {
        if !self.is_streaming.swap(false, Ordering::SeqCst) {
            warn!("Stream not active");
            return;
        }

        info!("Stopping stream");

        // Stopping the backend closes the frame channel, which ends the
        // pump's recv loop even if no further frame arrives.
        if let Some(mut backend) = self.backend.lock().await.take() {
            if let Err(e) = backend.stop().await {
                error!("Failed to stop camera backend: {}", e);
            }
        }

        if let Some(task) = self.pump_task.lock().await.take() {
            if let Err(e) = task.await {
                error!("Frame pump panicked: {}", e);
            }
        }

        self.latest_hands.write().await.clear();

        let last_seq = self.frame_seq.load(Ordering::SeqCst);
        self.state.write().await.finish_stream(last_seq);

        info!("Stream stopped");
    }
}
