//! Types for the placer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file placement job, one per pipeline run.
#[derive(Debug, Clone)]
pub struct PlacementJob {
    /// Unique job ID (the pipeline run ID).
    pub job_id: String,
    /// Files to place.
    pub files: Vec<FilePlacement>,
    /// Whether to delete staging files after successful placement. When
    /// false, placement copies and the staging file stays behind.
    pub cleanup_sources: bool,
    /// Whether to roll back already-placed files on failure.
    pub enable_rollback: bool,
}

/// A single report file placement request.
#[derive(Debug, Clone)]
pub struct FilePlacement {
    /// Report identifier (the staging filename without extension).
    pub report_id: String,
    /// Source file path in staging.
    pub source: PathBuf,
    /// Destination file path.
    pub destination: PathBuf,
    /// Whether to overwrite if destination exists.
    pub overwrite: bool,
    /// Verify checksum after copy (optional).
    pub verify_checksum: Option<ChecksumType>,
}

/// Type of checksum to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumType {
    /// SHA-256 checksum.
    Sha256,
    /// MD5 checksum (faster but less secure).
    Md5,
}

/// Result of a successful placement job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Job ID.
    pub job_id: String,
    /// Files successfully placed.
    pub files_placed: Vec<PlacedFile>,
    /// Total bytes placed.
    pub total_bytes: u64,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Information about a placed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedFile {
    /// Report identifier.
    pub report_id: String,
    /// Final destination path.
    pub destination: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Checksum if verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Rollback information for recovering from partial failures.
#[derive(Debug, Clone)]
pub struct RollbackPlan {
    /// Job ID.
    pub job_id: String,
    /// Files that were successfully placed (to be rolled back).
    pub placed_files: Vec<RollbackFile>,
    /// Directories that were created (to be removed).
    pub created_directories: Vec<PathBuf>,
}

/// A file that was placed and may need rollback.
#[derive(Debug, Clone)]
pub struct RollbackFile {
    /// Destination where file was placed.
    pub destination: PathBuf,
    /// Staging path to rename the file back to when the placement consumed
    /// its source (move). `None` when the staging copy still exists.
    pub restore_to: Option<PathBuf>,
    /// File size for verification.
    pub size_bytes: u64,
}

impl RollbackPlan {
    /// Creates a new empty rollback plan.
    pub fn new(job_id: String) -> Self {
        Self {
            job_id,
            placed_files: Vec::new(),
            created_directories: Vec::new(),
        }
    }

    /// Records a placed file for potential rollback. `restore_to` names the
    /// staging path to rename back to when the placement moved the file.
    pub fn record_placement(
        &mut self,
        destination: PathBuf,
        restore_to: Option<PathBuf>,
        size_bytes: u64,
    ) {
        self.placed_files.push(RollbackFile {
            destination,
            restore_to,
            size_bytes,
        });
    }

    /// Records a created directory for potential rollback.
    pub fn record_directory(&mut self, path: PathBuf) {
        self.created_directories.push(path);
    }

    /// Returns true if there's anything to roll back.
    pub fn has_changes(&self) -> bool {
        !self.placed_files.is_empty() || !self.created_directories.is_empty()
    }
}

/// Result of a rollback operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackResult {
    /// Job ID.
    pub job_id: String,
    /// Files that were successfully rolled back.
    pub files_removed: usize,
    /// Directories that were successfully removed.
    pub directories_removed: usize,
    /// Any errors that occurred during rollback.
    pub errors: Vec<String>,
    /// Whether rollback completed successfully.
    pub success: bool,
}
