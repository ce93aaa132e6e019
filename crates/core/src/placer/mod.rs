//! Placer module for moving report files to their destination folders.
//!
//! This module provides the `Placer` trait and the filesystem
//! implementation that relocates merged reports into their per-project
//! destination directories.
//!
//! # Features
//!
//! - Atomic moves when source and destination are on the same filesystem
//! - Automatic fallback to copy when atomic move fails
//! - Copy-only mode that leaves the staging file in place
//! - Checksum verification after placement
//! - Rollback of files already placed when a job fails partway
//! - Missing destination directories are an error unless parent creation
//!   is enabled
//!
//! # Example
//!
//! ```ignore
//! use reportino_core::placer::{FsPlacer, Placer, PlacementJob, FilePlacement};
//!
//! let placer = FsPlacer::with_defaults();
//!
//! let job = PlacementJob {
//!     job_id: "run-1".to_string(),
//!     files: vec![
//!         FilePlacement {
//!             report_id: "alpha_sales_20220117".to_string(),
//!             source: PathBuf::from("/staging/alpha_sales_20220117.xlsx"),
//!             destination: PathBuf::from("/srv/reports/alpha_sales/alpha_sales_20220117.xlsx"),
//!             overwrite: false,
//!             verify_checksum: None,
//!         },
//!     ],
//!     cleanup_sources: false,
//!     enable_rollback: true,
//! };
//!
//! let result = placer.place(job).await?;
//! println!("Placed {} files ({} bytes)", result.files_placed.len(), result.total_bytes);
//! ```

mod config;
mod error;
mod fs_placer;
mod traits;
mod types;

pub use config::PlacerConfig;
pub use error::PlacerError;
pub use fs_placer::FsPlacer;
pub use traits::Placer;
pub use types::{
    ChecksumType, FilePlacement, PlacedFile, PlacementJob, PlacementResult, RollbackFile,
    RollbackPlan, RollbackResult,
};
