//! Merger module for collating partial report workbooks.
//!
//! Downloaded report batches often arrive in parts: several `.xlsx` files
//! that describe the same report entry and need to be concatenated into a
//! single workbook. This module provides:
//!
//! - staging directory scanning (`.xlsx` files only)
//! - grouping of parts by *entry key*, the filename prefix up to and
//!   including the first 8-digit date run
//! - chronological ordering of parts by a date cell inside each workbook
//! - row concatenation, skipping a configured number of header rows on
//!   every part after the first
//!
//! Parts are assumed schema-compatible; the merger does not validate
//! columns. A workbook it cannot read, a date it cannot parse, or a
//! duplicate date inside one group aborts the merge.
//!
//! # Example
//!
//! ```ignore
//! use reportino_core::merger::{MergerConfig, XlsxMerger};
//!
//! let merger = XlsxMerger::new(MergerConfig::default());
//! let summary = merger.merge_all(staging_dir).await?;
//! println!("Merged {} groups", summary.groups_merged);
//! ```

mod config;
mod error;
mod grouping;
mod types;
mod xlsx_merger;

pub use config::{MergerConfig, SortOrder};
pub use error::MergerError;
pub use grouping::{entry_key, find_part_groups};
pub use types::{MergeOutcome, MergeSummary, PartGroup};
pub use xlsx_merger::XlsxMerger;
