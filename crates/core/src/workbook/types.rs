//! Types for the workbook module.

use chrono::NaiveDateTime;

use super::error::WorkbookError;

/// A single cell value.
///
/// This is the subset of spreadsheet data the pipeline cares about; formulas
/// are read as their cached values and error cells collapse to `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Returns the cell content as a string, if it naturally has one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An in-memory worksheet: a name and a dense grid of rows.
///
/// Rows are normalized to absolute coordinates, so `rows[1][0]` is always
/// cell A2 even when the source range did not start at A1.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Creates an empty sheet with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Number of rows in the sheet.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at (row, col), if present.
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(row as usize).and_then(|r| r.get(col as usize))
    }

    /// Rows after skipping the first `header_rows` rows.
    pub fn data_rows(&self, header_rows: usize) -> &[Vec<CellValue>] {
        if header_rows >= self.rows.len() {
            &[]
        } else {
            &self.rows[header_rows..]
        }
    }

    /// Appends the given rows to the sheet.
    pub fn append_rows(&mut self, rows: &[Vec<CellValue>]) {
        self.rows.extend_from_slice(rows);
    }
}

/// Parses an A1-style cell address into zero-based (row, col).
///
/// "A2" -> (1, 0), "C1" -> (0, 2).
pub fn parse_cell_address(address: &str) -> Result<(u32, u16), WorkbookError> {
    let letters: String = address
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &address[letters.len()..];

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(WorkbookError::InvalidCellAddress(address.to_string()));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
    }

    let row: u64 = digits
        .parse()
        .map_err(|_| WorkbookError::InvalidCellAddress(address.to_string()))?;
    if row == 0 || col == 0 || col > u16::MAX as u64 + 1 {
        return Err(WorkbookError::InvalidCellAddress(address.to_string()));
    }

    Ok(((row - 1) as u32, (col - 1) as u16))
}
