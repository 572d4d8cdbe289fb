use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use super::types::Release;
use crate::http::HttpClient;

/// Latest-release endpoint of the Backyard Monsters Refitted repository.
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/bym-refitted/backyard-monsters-refitted/releases/latest";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest_release(&self) -> Result<Release>;
    fn endpoint(&self) -> &str;
}

/// Fetches the latest release document from a GitHub-compatible endpoint.
pub struct GitHubReleases {
    pub http: HttpClient,
    pub endpoint: String,
}

impl GitHubReleases {
    #[tracing::instrument(skip(http, endpoint))]
    pub fn new(http: HttpClient, endpoint: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| LATEST_RELEASE_URL.to_string());
        Self { http, endpoint }
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self) -> Result<Release> {
        debug!("Fetching latest release from {}...", self.endpoint);

        let release: Release = self
            .http
            .get_json(&self.endpoint)
            .await
            .context("Failed to query release endpoint")?;

        debug!(
            "Latest release {} has {} assets",
            release.id,
            release.assets.len()
        );
        Ok(release)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
