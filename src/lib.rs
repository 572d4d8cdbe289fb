pub mod asset;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod release;
pub mod runtime;
pub mod sync;
pub mod version;

pub use error::PatchError;
pub use release::{Release, ReleaseAsset};
pub use sync::{AssetOutcome, Patcher, SyncReport};
