//! Types for the fetcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A report file that was downloaded into staging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedReport {
    /// Source URL.
    pub url: String,
    /// Local path inside the staging directory.
    pub path: PathBuf,
    /// Downloaded size in bytes.
    pub size_bytes: u64,
}
