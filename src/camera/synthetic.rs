// Synthetic camera backend: emits generated frames at the requested rate.
// Stands in for real hardware during development and in tests.

use anyhow::{bail, Result};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::backend::{CameraBackend, CameraConfig, VideoFrame};

pub struct SyntheticBackend {
    config: CameraConfig,
    task: Option<JoinHandle<()>>,
}

impl SyntheticBackend {
    pub fn new(config: CameraConfig) -> Self {
        Self { config, task: None }
    }
}

#[async_trait::async_trait]
impl CameraBackend for SyntheticBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<VideoFrame>> {
        if self.task.is_some() {
            bail!("Already capturing");
        }

        info!(
            "Starting synthetic capture ({}x{} @ {} fps)",
            self.config.width, self.config.height, self.config.frame_rate
        );

        let (tx, rx) = mpsc::channel(8);
        let config = self.config.clone();

        let task = tokio::spawn(async move {
            let period = Duration::from_millis(1000 / config.frame_rate.max(1) as u64);
            let mut ticker = tokio::time::interval(period);
            let started = Instant::now();
            let frame_len = (config.width * config.height * 3) as usize;

            loop {
                ticker.tick().await;
                let frame = VideoFrame {
                    data: vec![0x80; frame_len],
                    width: config.width,
                    height: config.height,
                    timestamp_ms: started.elapsed().as_millis() as u64,
                };
                if tx.send(frame).await.is_err() {
                    break;
                }
            }
        });

        self.task = Some(task);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Synthetic capture stopped");
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.task.is_some()
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
