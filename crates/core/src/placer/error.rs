//! Error types for the placer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during report placement.
#[derive(Debug, Error)]
pub enum PlacerError {
    /// Source file not found.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination already exists and overwrite is disabled.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// The destination directory is missing and parent creation is disabled.
    #[error("Destination directory does not exist: {path}")]
    DestinationDirMissing { path: PathBuf },

    /// Failed to create destination directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy file.
    #[error("Failed to copy file from {source} to {destination}")]
    CopyFailed {
        source: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Checksum verification failed.
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Failed to calculate checksum.
    #[error("Failed to calculate checksum for {path}")]
    ChecksumCalculationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete source file during cleanup.
    #[error("Failed to cleanup source file: {path}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rollback failed.
    #[error("Rollback failed: {reason}")]
    RollbackFailed { reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlacerError {
    /// Creates a copy failed error.
    pub fn copy_failed(source: PathBuf, destination: PathBuf, error: std::io::Error) -> Self {
        Self::CopyFailed {
            source,
            destination,
            error,
        }
    }
}
