//! Types for the pipeline module.

use serde::{Deserialize, Serialize};

use crate::config::ReportCadence;
use crate::merger::MergeOutcome;
use crate::placer::PlacedFile;

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run ID.
    pub run_id: String,
    /// Cadence label from the configuration.
    pub cadence: ReportCadence,
    /// Report files downloaded during the fetch phase.
    pub files_fetched: usize,
    /// Part groups merged.
    pub groups_merged: usize,
    /// Part files consumed by merging.
    pub parts_consumed: usize,
    /// Report files placed into destination folders.
    pub files_placed: usize,
    /// Total bytes placed.
    pub total_bytes_placed: u64,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
    /// Per-group merge outcomes.
    pub merge_outcomes: Vec<MergeOutcome>,
    /// Per-file placement records.
    pub placed: Vec<PlacedFile>,
}
