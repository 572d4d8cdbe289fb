//! Sync orchestration: compare the remote release to the local marker and
//! download the new build when they differ.

use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use crate::asset::classify;
use crate::download::ArtifactDownloader;
use crate::release::{Release, ReleaseSource};
use crate::runtime::Runtime;
use crate::version::VersionStore;

/// What happened to a single release asset during a sync.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetOutcome {
    Downloaded {
        name: String,
        file_name: String,
        path: PathBuf,
    },
    Failed {
        name: String,
        file_name: String,
        error: String,
    },
}

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// The fetched release metadata
    pub release: Release,
    /// Marker value before the sync
    pub previous_version: u64,
    /// True when nothing had to be downloaded
    pub up_to_date: bool,
    /// One entry per asset, in server order
    pub assets: Vec<AssetOutcome>,
    /// False when the marker could not be written; the next run re-downloads
    pub marker_updated: bool,
}

impl SyncReport {
    pub fn failed_assets(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.assets
            .iter()
            .filter(|outcome| matches!(outcome, AssetOutcome::Failed { .. }))
    }
}

/// Composes release fetching, the version store and the downloader.
pub struct Patcher<'a, R: Runtime, S: ReleaseSource, D: ArtifactDownloader> {
    source: S,
    downloader: D,
    versions: VersionStore<'a, R>,
}

impl<'a, R: Runtime, S: ReleaseSource, D: ArtifactDownloader> Patcher<'a, R, S, D> {
    pub fn new(source: S, downloader: D, versions: VersionStore<'a, R>) -> Self {
        Self {
            source,
            downloader,
            versions,
        }
    }

    /// Runs one sync.
    ///
    /// Fetch and marker-read failures abort before anything is downloaded.
    /// Per-asset failures and a failed marker update are logged and recorded
    /// in the report without failing the sync.
    #[tracing::instrument(skip(self))]
    pub async fn sync(&self) -> Result<SyncReport> {
        let release = self
            .source
            .latest_release()
            .await
            .with_context(|| format!("Cannot get latest build from {}", self.source.endpoint()))?;

        let previous_version = self
            .versions
            .ensure_and_read()
            .context("Cannot read local version")?;

        println!(
            "Current version: {} | Latest version: {}",
            previous_version, release.id
        );

        if previous_version == release.id {
            println!("   up to date {}", release.id);
            return Ok(SyncReport {
                release,
                previous_version,
                up_to_date: true,
                assets: Vec::new(),
                marker_updated: false,
            });
        }

        println!(" downloading {} assets of build {}", release.assets.len(), release.id);

        let mut assets = Vec::with_capacity(release.assets.len());
        for asset in &release.assets {
            let file_name = classify(&asset.name).to_string();

            match self
                .downloader
                .download(&asset.browser_download_url, &file_name)
                .await
            {
                Ok(path) => {
                    println!("  downloaded {} {}", asset.name, path.display());
                    assets.push(AssetOutcome::Downloaded {
                        name: asset.name.clone(),
                        file_name,
                        path,
                    });
                }
                Err(e) => {
                    warn!("Error downloading build {}: {:#}", asset.name, e);
                    assets.push(AssetOutcome::Failed {
                        name: asset.name.clone(),
                        file_name,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        let marker_updated = match self.versions.write(release.id) {
            Ok(()) => true,
            Err(e) => {
                warn!("{:#}", e);
                false
            }
        };

        info!(
            "Synced build {} into {:?}",
            release.id,
            self.versions.build_dir()
        );

        Ok(SyncReport {
            release,
            previous_version,
            up_to_date: false,
            assets,
            marker_updated,
        })
    }
}
