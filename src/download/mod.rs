use crate::error::PatchError;
use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::{Component, Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactDownloader: Send + Sync {
    /// Downloads `url` into the build directory as `destination_name` and
    /// returns the absolute path of the written file.
    async fn download(&self, url: &str, destination_name: &str) -> Result<PathBuf>;
}

/// Streams release assets into the build directory.
pub struct HttpDownloader<R: Runtime> {
    runtime: R,
    http: HttpClient,
    build_dir: PathBuf,
}

impl<R: Runtime> HttpDownloader<R> {
    pub fn new(runtime: R, http: HttpClient, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            http,
            build_dir: build_dir.into(),
        }
    }
}

#[async_trait]
impl<R: Runtime> ArtifactDownloader for HttpDownloader<R> {
    #[tracing::instrument(skip(self))]
    async fn download(&self, url: &str, destination_name: &str) -> Result<PathBuf> {
        let target = destination_path(&self.build_dir, destination_name)?;

        self.runtime
            .create_dir_all(&self.build_dir)
            .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
            .with_context(|| format!("Failed to create build directory {:?}", self.build_dir))?;

        info!("Downloading {} to {:?}...", url, target);

        let body = self
            .http
            .download_file(url, || {
                self.runtime
                    .create_file(&target)
                    .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
                    .with_context(|| format!("Failed to create file at {:?}", target))
            })
            .await?;

        info!("Download complete: {} bytes ({})", body.bytes, body.status);

        self.runtime
            .absolute(&target)
            .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
            .with_context(|| format!("Failed to resolve absolute path of {:?}", target))
    }
}

/// Joins a destination name onto the build directory.
///
/// The name must be one plain path component so an asset can never be
/// written outside the build directory.
fn destination_path(build_dir: &Path, destination_name: &str) -> Result<PathBuf> {
    let mut components = Path::new(destination_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(build_dir.join(destination_name)),
        _ => Err(PatchError::Filesystem(format!(
            "invalid destination file name {:?}",
            destination_name
        ))
        .into()),
    }
}
