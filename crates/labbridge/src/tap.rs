//! Tap listener: the streaming ingestion path.
//!
//! One independent worker per configured endpoint. Connecting →
//! Streaming → Reconnect-wait → Connecting, until a stop is requested.
//! Received bytes are appended verbatim to the capture log and flushed
//! immediately so sibling processes can read them; the log is never
//! truncated or rotated here.

use crate::shutdown::ShutdownToken;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct TapConfig {
    pub host: String,
    pub port: u16,
    pub capture_path: PathBuf,
    pub reconnect_delay: Duration,
}

impl TapConfig {
    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Owned handle to a running tap listener task. Stop by triggering the
/// shutdown token passed to [`TapListener::spawn`], then `join`.
pub struct TapListener {
    endpoint: String,
    handle: JoinHandle<()>,
}

impl TapListener {
    pub fn spawn(config: TapConfig, shutdown: ShutdownToken) -> Self {
        let endpoint = config.endpoint();
        tracing::info!(%endpoint, capture = %config.capture_path.display(), "Tap listener started");
        let handle = tokio::spawn(run_listener(config, shutdown));
        Self { endpoint, handle }
    }

    /// Await the listener task's exit.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            tracing::warn!(endpoint = %self.endpoint, error = %err, "Tap listener task failed");
        }
    }
}

async fn run_listener(config: TapConfig, shutdown: ShutdownToken) {
    let endpoint = config.endpoint();

    while !shutdown.is_triggered() {
        let stream = match TcpStream::connect(&endpoint).await {
            Ok(stream) => {
                tracing::info!(%endpoint, "Connected");
                stream
            }
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "Connect failed");
                if !reconnect_wait(&config, &shutdown).await {
                    break;
                }
                continue;
            }
        };

        if let Err(err) = stream_to_capture(&config, stream, &shutdown).await {
            tracing::warn!(%endpoint, error = %err, "Capture stream error");
        }

        if shutdown.is_triggered() {
            break;
        }
        if !reconnect_wait(&config, &shutdown).await {
            break;
        }
    }

    tracing::info!(%endpoint, "Tap listener exiting");
}

/// Fixed-delay reconnect wait. Returns false when a stop was requested
/// during the wait, in which case no further connection attempt is
/// made.
async fn reconnect_wait(config: &TapConfig, shutdown: &ShutdownToken) -> bool {
    tracing::info!(
        endpoint = %config.endpoint(),
        delay_ms = config.reconnect_delay.as_millis() as u64,
        "Reconnecting after delay"
    );
    tokio::time::sleep(config.reconnect_delay).await;
    !shutdown.is_triggered()
}

/// Copy incoming bytes to the capture log until the remote closes, a
/// read fails, or a stop is observed between reads.
async fn stream_to_capture(
    config: &TapConfig,
    mut stream: TcpStream,
    shutdown: &ShutdownToken,
) -> io::Result<()> {
    let mut capture = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.capture_path)?;

    let mut buf = [0u8; 4096];
    while !shutdown.is_triggered() {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            tracing::info!(endpoint = %config.endpoint(), "Connection closed by remote");
            return Ok(());
        }
        capture.write_all(&buf[..n])?;
        capture.flush()?;
    }
    Ok(())
}
