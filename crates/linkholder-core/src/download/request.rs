//! Download request, outcome types and the initiator seam.

use std::fmt;
use std::path::PathBuf;

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictAction {
    /// Keep the existing file; save as `name (1).ext`, `name (2).ext`, ...
    #[default]
    Uniquify,
    /// Replace the existing file.
    Overwrite,
}

/// One file to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Relative to the initiator's download root, e.g. `MyParts/widget.stp`.
    pub destination: PathBuf,
    pub conflict: ConflictAction,
}

/// Opaque handle returned once a download has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why one download could not be started (or, for blocking initiators, completed).
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("{0}")]
    Transfer(#[from] curl::Error),
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("download task failed: {0}")]
    Task(String),
}

/// Platform service that starts a download. Called from a blocking task, so
/// implementations may do the whole transfer before returning.
pub trait DownloadInitiator: Send + Sync {
    fn start(&self, request: &DownloadRequest) -> Result<DownloadId, DownloadError>;
}
