//! Error types for the workbook module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a workbook.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Failed to open a workbook file.
    #[error("Failed to open workbook: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// The named worksheet does not exist in the workbook.
    #[error("Worksheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// Failed to read a worksheet range.
    #[error("Failed to read worksheet '{sheet}' from {path}")]
    Read {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    /// Failed to write a workbook file.
    #[error("Failed to write workbook: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// A cell address string could not be parsed (expected e.g. "A2").
    #[error("Invalid cell address: {0}")]
    InvalidCellAddress(String),
}
