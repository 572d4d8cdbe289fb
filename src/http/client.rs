//! HTTP client for the release endpoint and asset downloads.
//!
//! Requests are issued exactly once; there is no retry policy.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::io::Write;

use crate::error::PatchError;

/// Thin wrapper over a shared reqwest `Client`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

/// Outcome of a streamed download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadedBody {
    pub status: StatusCode,
    pub bytes: u64,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// Only `200 OK` counts as success; any other status is reported as
    /// [`PatchError::HttpStatus`] with the status text.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PatchError::transport(&e))
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PatchError::HttpStatus(status.to_string()).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PatchError::transport(&e))
            .context("Failed to read response body")?;

        serde_json::from_slice(&body)
            .map_err(|e| PatchError::Decode(e.to_string()))
            .context("Failed to parse JSON response")
    }

    /// Streams the body of `url` into the writer produced by `create_writer`.
    ///
    /// The status code is not checked: whatever body the server sends is
    /// written. The writer is only created once response headers arrived and
    /// is flushed before returning.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<DownloadedBody>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PatchError::transport(&e))
            .context("Failed to start download request")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Download of {} answered {}, saving body anyway", url, status);
        }

        let mut writer = create_writer()?;
        let mut bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| PatchError::transport(&e))
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .map_err(|e| PatchError::Filesystem(e.to_string()))
                .context("Failed to write chunk to file")?;
            bytes += chunk.len() as u64;
        }

        writer
            .flush()
            .map_err(|e| PatchError::Filesystem(e.to_string()))
            .context("Failed to flush downloaded file")?;

        debug!("Downloaded {:.2} MB", bytes as f64 / (1024.0 * 1024.0));

        Ok(DownloadedBody { status, bytes })
    }
}
