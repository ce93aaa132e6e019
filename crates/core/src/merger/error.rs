//! Error types for the merger module.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::workbook::WorkbookError;

/// Errors that can occur while collating partial reports.
#[derive(Debug, Error)]
pub enum MergerError {
    /// The staging directory does not exist or is not a directory.
    #[error("Staging directory not found: {0}")]
    StagingDirNotFound(PathBuf),

    /// A report filename carries no 8-digit date run to key it by.
    #[error("Cannot derive a report entry from filename: {file}")]
    MissingEntryKey { file: String },

    /// A merge group carried no part files.
    #[error("Report group '{0}' has no part files")]
    EmptyGroup(String),

    /// The configured date cell is empty or absent in a part.
    #[error("Date cell {cell} is missing or empty in {file}")]
    DateCellMissing { file: String, cell: String },

    /// The date cell holds a value that is neither text nor a date.
    #[error("Date cell {cell} in {file} holds a non-date value")]
    DateCellInvalid { file: String, cell: String },

    /// The date cell text did not match the configured format.
    #[error("Cannot parse date '{value}' from cell {cell} in {file}")]
    DateParse {
        file: String,
        cell: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Two parts of the same group carry the same report date, which means
    /// the same data was downloaded twice.
    #[error("Duplicate report date {date} in group '{entry}', re-create the downloads")]
    DuplicateDate { entry: String, date: NaiveDate },

    /// Workbook I/O failed.
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking workbook task panicked or was cancelled.
    #[error("Workbook task failed: {0}")]
    TaskFailed(String),
}
