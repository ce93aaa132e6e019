//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while downloading report files.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A source URL has no usable file name in its path.
    #[error("Cannot derive a file name from URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// The request failed before a response arrived.
    #[error("Request failed for {url}: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Failed to write the downloaded file.
    #[error("Failed to write downloaded file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The staging directory does not exist or is not a directory.
    #[error("Staging directory not found: {0}")]
    StagingDirNotFound(PathBuf),
}
