//! Workbook writing via rust_xlsxwriter.

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::error::WorkbookError;
use super::types::{CellValue, Sheet};

/// Writes a sheet to an `.xlsx` file with a single worksheet.
///
/// Overwrites the destination if it already exists.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<(), WorkbookError> {
    let write_err = |source| WorkbookError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name).map_err(write_err)?;

    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = row_idx as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::String(s) => {
                    worksheet
                        .write_string(row_num, col_num, s)
                        .map_err(write_err)?;
                }
                CellValue::Number(n) => {
                    worksheet
                        .write_number(row_num, col_num, *n)
                        .map_err(write_err)?;
                }
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row_num, col_num, *b)
                        .map_err(write_err)?;
                }
                CellValue::DateTime(dt) => {
                    worksheet
                        .write_datetime_with_format(row_num, col_num, dt, &datetime_format)
                        .map_err(write_err)?;
                }
            }
        }
    }

    workbook.save(path).map_err(write_err)?;
    Ok(())
}
