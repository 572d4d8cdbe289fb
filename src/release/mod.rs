//! Release metadata: the remote "latest release" document and its fetcher.

mod client;
mod types;

pub use client::{GitHubReleases, LATEST_RELEASE_URL, ReleaseSource};
#[cfg(test)]
pub use client::MockReleaseSource;
pub use types::{Release, ReleaseAsset};
