//! Local version marker stored as `<build dir>/version.txt`.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::PatchError;
use crate::runtime::Runtime;

pub const VERSION_FILE_NAME: &str = "version.txt";

/// Reads and writes the id of the last synced release.
pub struct VersionStore<'a, R: Runtime> {
    runtime: &'a R,
    build_dir: PathBuf,
}

impl<'a, R: Runtime> VersionStore<'a, R> {
    pub fn new(runtime: &'a R, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            build_dir: build_dir.into(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn version_path(&self) -> PathBuf {
        self.build_dir.join(VERSION_FILE_NAME)
    }

    /// Creates the build directory and a `0` marker if missing, then reads
    /// the marker back.
    ///
    /// Content that is not a non-negative decimal integer is a
    /// [`PatchError::Decode`]; it is never reset to 0.
    #[tracing::instrument(skip(self))]
    pub fn ensure_and_read(&self) -> Result<u64> {
        self.runtime
            .create_dir_all(&self.build_dir)
            .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
            .with_context(|| format!("Failed to create build directory {:?}", self.build_dir))?;

        let path = self.version_path();
        if !self.runtime.exists(&path) {
            info!("No version marker at {:?}, starting from 0", path);
            self.runtime
                .write(&path, b"0")
                .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
                .with_context(|| format!("Failed to create version file {:?}", path))?;
        }

        let content = self
            .runtime
            .read_to_string(&path)
            .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
            .with_context(|| format!("Failed to read version file {:?}", path))?;

        let version = parse_version(&content)
            .with_context(|| format!("Failed to parse version file {:?}", path))?;
        debug!("Local version is {}", version);
        Ok(version)
    }

    /// Replaces the marker content with `version`.
    #[tracing::instrument(skip(self))]
    pub fn write(&self, version: u64) -> Result<()> {
        let path = self.version_path();
        self.runtime
            .write(&path, version.to_string().as_bytes())
            .map_err(|e| PatchError::Filesystem(format!("{:#}", e)))
            .with_context(|| format!("Failed to update version file {:?}", path))?;
        debug!("Stored version {} in {:?}", version, path);
        Ok(())
    }
}

/// Parses marker content; surrounding whitespace such as a trailing newline
/// is tolerated.
pub fn parse_version(content: &str) -> Result<u64, PatchError> {
    content
        .trim()
        .parse::<u64>()
        .map_err(|e| PatchError::Decode(format!("invalid version {:?}: {}", content, e)))
}
