// Adapter for a MediaPipe hand-landmark helper process
//
// Protocol: after startup the helper prints "READY". For each frame the
// engine writes a 12-byte header (width, height, channels as little-endian
// u32) followed by raw RGB24 bytes on stdin; the helper answers with one
// JSON line on stdout: {"hands": [{"score": f, "landmarks": [{"x","y","z"}]}]}.
// The helper is expected to run the hand landmark model with up to two hands
// per frame.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{info, warn};

use super::detector::LandmarkDetector;
use super::types::{HandObservation, Landmark};
use crate::camera::VideoFrame;

#[derive(Debug, Deserialize)]
struct LandmarkJson {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
struct HandJson {
    #[allow(dead_code)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Debug, Deserialize)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Hand landmark detector backed by a MediaPipe helper process
pub struct MediaPipeDetector {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl MediaPipeDetector {
    /// Spawn the helper and wait for its READY handshake
    pub async fn spawn(interpreter: &str, script: impl AsRef<Path>) -> Result<Self> {
        let script = script.as_ref();
        if !script.exists() {
            bail!("hand detection helper not found at {}", script.display());
        }

        info!("Starting hand landmark helper: {} {}", interpreter, script.display());

        let mut child = Command::new(interpreter)
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .context("Failed to start hand landmark helper")?;

        let stdin = child.stdin.take().context("Failed to open helper stdin")?;
        let stdout = child.stdout.take().context("Failed to open helper stdout")?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout
            .read_line(&mut ready)
            .await
            .context("Failed to read helper handshake")?;
        if ready.trim() != "READY" {
            bail!("hand landmark helper did not signal READY, got: {}", ready.trim());
        }

        info!("Hand landmark helper ready");

        Ok(Self { child, stdin, stdout })
    }
}

#[async_trait::async_trait]
impl LandmarkDetector for MediaPipeDetector {
    async fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<HandObservation>> {
        self.stdin.write_all(&frame.width.to_le_bytes()).await?;
        self.stdin.write_all(&frame.height.to_le_bytes()).await?;
        self.stdin.write_all(&3u32.to_le_bytes()).await?;
        self.stdin
            .write_all(&frame.data)
            .await
            .context("Failed to send frame to helper")?;
        self.stdin.flush().await?;

        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .await
            .context("Failed to read detection result")?;
        if n == 0 {
            bail!("hand landmark helper exited");
        }

        let result: DetectionJson =
            serde_json::from_str(line.trim()).context("Malformed detection result")?;
        if let Some(err) = result.error {
            warn!("Hand landmark helper reported: {}", err);
            return Ok(Vec::new());
        }

        Ok(result
            .hands
            .into_iter()
            .map(|hand| {
                HandObservation::new(
                    hand.landmarks
                        .iter()
                        .map(|p| Landmark::new(p.x, p.y, p.z))
                        .collect(),
                )
            })
            .collect())
    }

    fn name(&self) -> &str {
        "mediapipe"
    }
}

impl Drop for MediaPipeDetector {
    fn drop(&mut self) {
        if let Err(e) = self.child.start_kill() {
            warn!("Failed to stop hand landmark helper: {}", e);
        }
    }
}
