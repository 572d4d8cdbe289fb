//! HTTP client module with status and error classification.

mod client;

pub use client::{DownloadedBody, HttpClient};
