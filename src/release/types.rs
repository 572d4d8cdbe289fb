use serde::{Deserialize, Serialize};

/// Represents a downloadable asset of a release
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub browser_download_url: String,
    pub name: String,
}

/// Represents the latest published release
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}
