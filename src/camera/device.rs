// Webcam backend via OpenCV VideoCapture (feature "device-camera")
//
// Capture runs on a dedicated thread because VideoCapture::read blocks.
// The thread owns the device handle; dropping the capture at thread exit
// releases it.

use anyhow::{bail, Context, Result};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::{imgproc, videoio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::backend::{CameraBackend, CameraConfig, VideoFrame};

pub struct DeviceBackend {
    index: u32,
    config: CameraConfig,
    running: Arc<AtomicBool>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl DeviceBackend {
    pub fn new(index: u32, config: CameraConfig) -> Result<Self> {
        Ok(Self {
            index,
            config,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }
}

#[async_trait::async_trait]
impl CameraBackend for DeviceBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<VideoFrame>> {
        if self.running.load(Ordering::SeqCst) {
            bail!("Already capturing");
        }

        let mut capture = videoio::VideoCapture::new(self.index as i32, videoio::CAP_ANY)
            .context("Failed to open capture device")?;
        if !capture.is_opened().unwrap_or(false) {
            bail!("Camera access denied or device {} unavailable", self.index);
        }

        capture.set(videoio::CAP_PROP_FRAME_WIDTH, self.config.width as f64)?;
        capture.set(videoio::CAP_PROP_FRAME_HEIGHT, self.config.height as f64)?;
        capture.set(videoio::CAP_PROP_FPS, self.config.frame_rate as f64)?;

        info!(
            "Starting webcam capture on device {} ({}x{} @ {} fps requested)",
            self.index, self.config.width, self.config.height, self.config.frame_rate
        );

        let (tx, rx) = mpsc::channel(4);
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::SeqCst);

        let worker = std::thread::spawn(move || {
            let started = Instant::now();
            let mut bgr = Mat::default();
            let mut rgb = Mat::default();

            while running.load(Ordering::SeqCst) {
                match capture.read(&mut bgr) {
                    Ok(true) if !bgr.empty() => {}
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Frame read failed: {}", e);
                        break;
                    }
                }

                let frame = match convert(&bgr, &mut rgb, started) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("Frame conversion failed: {}", e);
                        continue;
                    }
                };

                if tx.blocking_send(frame).is_err() {
                    break;
                }
            }
            // capture dropped here, releasing the device
        });

        self.worker = Some(worker);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Capture thread panicked");
            }
        }
        info!("Webcam capture stopped");
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "device"
    }
}

fn convert(bgr: &Mat, rgb: &mut Mat, started: Instant) -> Result<VideoFrame> {
    imgproc::cvt_color(bgr, rgb, imgproc::COLOR_BGR2RGB, 0)?;
    Ok(VideoFrame {
        data: rgb.data_bytes()?.to_vec(),
        width: rgb.cols() as u32,
        height: rgb.rows() as u32,
        timestamp_ms: started.elapsed().as_millis() as u64,
    })
}
