//! Error kinds surfaced by the patcher.
//!
//! Functions return `anyhow::Result`; the root cause is one of these variants
//! and can be recovered with `downcast_ref::<PatchError>()`.

/// Classified failure of a fetch, download or version-marker operation.
#[derive(Debug)]
pub enum PatchError {
    /// Network failure: DNS, connection, timeout, broken body stream
    Transport(String),
    /// Metadata endpoint answered with something other than 200 OK
    HttpStatus(String),
    /// Malformed JSON or a malformed version marker
    Decode(String),
    /// Directory or file could not be created, read or written
    Filesystem(String),
}

impl PatchError {
    /// Wraps a reqwest failure that happened before any status was received.
    pub fn transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            PatchError::Transport(format!("request timed out: {}", error))
        } else {
            PatchError::Transport(error.to_string())
        }
    }
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::Transport(msg) => write!(f, "Network error: {}", msg),
            PatchError::HttpStatus(status) => {
                write!(f, "Failed to fetch latest release: {}", status)
            }
            PatchError::Decode(msg) => write!(f, "Decode error: {}", msg),
            PatchError::Filesystem(msg) => write!(f, "Filesystem error: {}", msg),
        }
    }
}

impl std::error::Error for PatchError {}

/// Returns the classified kind of an error, if it carries one.
pub fn kind_of(error: &anyhow::Error) -> Option<&PatchError> {
    error.chain().find_map(|cause| cause.downcast_ref::<PatchError>())
}
