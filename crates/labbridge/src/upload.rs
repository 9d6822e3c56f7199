//! Upload transport: HTTP delivery of envelopes.
//!
//! No retry lives here; a failed file is simply found again by the
//! next scan pass.

use anyhow::{Context, Result};
use labbridge_protocol::defaults::UPLOAD_TIMEOUT_SECS;
use std::path::Path;
use std::time::Duration;

/// Placeholder logged when a failed delivery carried no response body.
const NO_RESPONSE: &str = "(no response)";

/// HTTP delivery client, built once at startup and shared by every
/// upload for the process lifetime.
pub struct Uploader {
    client: reqwest::Client,
}

impl Uploader {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// POST `body` to `endpoint`. Returns true exactly when the
    /// transport completed without error and the status was 2xx; only
    /// then may the caller delete the source file.
    pub async fn deliver(&self, endpoint: &str, source: &Path, body: String) -> bool {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                tracing::info!(file = %source.display(), %endpoint, "Upload successful");
                true
            }
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                let text = if text.is_empty() {
                    NO_RESPONSE.to_string()
                } else {
                    text
                };
                tracing::error!(
                    file = %source.display(),
                    %endpoint,
                    %status,
                    response = %text,
                    "Upload rejected"
                );
                false
            }
            Err(err) => {
                tracing::error!(
                    file = %source.display(),
                    %endpoint,
                    error = %err,
                    response = NO_RESPONSE,
                    "Upload failed"
                );
                false
            }
        }
    }
}
