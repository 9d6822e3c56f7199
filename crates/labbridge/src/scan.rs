//! Scan dispatcher: the batch-mode ingestion path.
//!
//! A periodic pass enumerates eligible export files in the watched
//! directory and runs each one through tokenize → classify → parse →
//! encode → upload → delete, fully sequentially. A failure on one file
//! never aborts the rest of the pass, and a file is deleted if and
//! only if its upload was acknowledged.

use crate::ingest::{self, classify::classify, tokenize::tokenize_export, ExportKind};
use crate::shutdown::ShutdownToken;
use crate::upload::Uploader;
use anyhow::{Context, Result};
use labbridge_protocol::defaults::EXPORT_EXTENSION;
use labbridge_protocol::{encode_envelope, MachineIdentity};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scan-path configuration. Endpoint URLs default to the fixed
/// deployment values in `labbridge_protocol::defaults`.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub scan_dir: PathBuf,
    pub interval: Duration,
    pub cbc_endpoint: String,
    pub biochem_endpoint: String,
    pub urine_endpoint: String,
}

pub struct ScanDispatcher {
    config: ScanConfig,
    identity: MachineIdentity,
    uploader: Uploader,
}

impl ScanDispatcher {
    pub fn new(config: ScanConfig, identity: MachineIdentity, uploader: Uploader) -> Self {
        Self {
            config,
            identity,
            uploader,
        }
    }

    /// Periodic scan loop; runs until the shutdown token fires. The
    /// token is polled at pass boundaries only.
    pub async fn run(self, shutdown: ShutdownToken) {
        while !shutdown.is_triggered() {
            tracing::debug!(dir = %self.config.scan_dir.display(), "Running analyser scan pass");
            if let Err(err) = self.run_pass().await {
                tracing::warn!(error = %err, "Scan pass failed");
            }
            tokio::time::sleep(self.config.interval).await;
        }
        tracing::info!("Scan loop exiting");
    }

    /// One pass over the watched directory. Only flat `.txt` files are
    /// eligible; each is processed independently.
    pub async fn run_pass(&self) -> Result<()> {
        let entries = fs::read_dir(&self.config.scan_dir).with_context(|| {
            format!(
                "Failed to list scan directory: {}",
                self.config.scan_dir.display()
            )
        })?;

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    tracing::warn!(error = %err, "Unreadable directory entry");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(EXPORT_EXTENSION) {
                continue;
            }
            self.process_file(&path).await;
        }
        Ok(())
    }

    async fn process_file(&self, path: &Path) {
        let raw = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "Failed to read export");
                return;
            }
        };
        let text = String::from_utf8_lossy(&raw);

        let tokens = tokenize_export(&text);
        let kind = classify(&tokens);
        tracing::info!(file = %path.display(), parser = kind.as_str(), "Processing export");

        let record = match ingest::parse_export(kind, &tokens, &text) {
            Ok(record) => record,
            Err(reason) => {
                tracing::warn!(file = %path.display(), %reason, "Export rejected");
                return;
            }
        };

        let body = encode_envelope(&record, &self.identity);
        let endpoint = self.endpoint_for(kind);
        if self.uploader.deliver(endpoint, path, body).await {
            // Ack-gated cleanup: only a confirmed 2xx earns a delete.
            if let Err(err) = fs::remove_file(path) {
                tracing::warn!(file = %path.display(), error = %err, "Failed to delete uploaded export");
            }
        }
    }

    fn endpoint_for(&self, kind: ExportKind) -> &str {
        match kind {
            ExportKind::Cbc => &self.config.cbc_endpoint,
            ExportKind::Biochem => &self.config.biochem_endpoint,
            ExportKind::Urine => &self.config.urine_endpoint,
        }
    }
}
