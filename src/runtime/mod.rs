//! Runtime abstraction for filesystem operations.
//!
//! The version store and the downloader only touch the disk through this
//! trait, so tests can swap in a `MockRuntime` or point a `RealRuntime` at a
//! temporary directory.

mod fs;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the whole file content, creating the file if needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Create (or truncate) a file for streaming writes.
    /// The handle is closed when the returned box is dropped.
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;

    /// Make a path absolute against the current directory without touching
    /// symlinks.
    fn absolute(&self, path: &Path) -> Result<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        self.absolute_impl(path)
    }
}
