//! Reading and writing Excel workbooks.
//!
//! Report parts arrive as `.xlsx` files and the merged output is written
//! back as `.xlsx`. Reading goes through `calamine`, writing through
//! `rust_xlsxwriter`; both are blocking, so callers on the async side wrap
//! these functions in `spawn_blocking`.
//!
//! Cell styles are not preserved: a sheet is a grid of plain values,
//! normalized to absolute coordinates so `A2` always means row 1, column 0
//! regardless of where the source range starts.

mod error;
mod reader;
mod types;
mod writer;

pub use error::WorkbookError;
pub use reader::read_sheet;
pub use types::{parse_cell_address, CellValue, Sheet};
pub use writer::write_sheet;
