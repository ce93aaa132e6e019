//! Workbook reading via calamine.

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use std::path::Path;

use super::error::WorkbookError;
use super::types::{CellValue, Sheet};

/// Reads the named worksheet from an `.xlsx` file into memory.
///
/// The returned grid is normalized to absolute coordinates: if the used
/// range starts below or right of A1, leading empty rows and cells are
/// inserted so cell addresses stay meaningful.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Sheet, WorkbookError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| WorkbookError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let range = workbook.worksheet_range(sheet_name).map_err(|e| match e {
        XlsxError::WorksheetNotFound(_) => WorkbookError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
        },
        other => WorkbookError::Read {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            source: other,
        },
    })?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut sheet = Sheet::new(sheet_name);
    for _ in 0..start_row {
        sheet.rows.push(Vec::new());
    }

    for row in range.rows() {
        let mut cells: Vec<CellValue> = Vec::with_capacity(start_col as usize + row.len());
        cells.resize(start_col as usize, CellValue::Empty);
        for cell in row {
            cells.push(convert_cell(cell));
        }
        sheet.rows.push(cells);
    }

    Ok(sheet)
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::write_sheet;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let result = read_sheet(Path::new("/nonexistent/report.xlsx"), "report");
        assert!(matches!(result, Err(WorkbookError::Open { .. })));
    }

    #[test]
    fn test_read_missing_sheet() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xlsx");

        let mut sheet = Sheet::new("report");
        sheet.rows = vec![vec![CellValue::Number(1.0)]];
        write_sheet(&path, &sheet).unwrap();

        let result = read_sheet(&path, "other");
        assert!(matches!(result, Err(WorkbookError::SheetNotFound { .. })));
    }

    #[test]
    fn test_read_back_written_sheet() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.xlsx");

        let mut sheet = Sheet::new("report");
        sheet.rows = vec![
            vec![
                CellValue::String("date".into()),
                CellValue::String("count".into()),
            ],
            vec![CellValue::String("17-Jan-2022".into()), CellValue::Number(42.0)],
            vec![CellValue::String("18-Jan-2022".into()), CellValue::Bool(true)],
        ];
        write_sheet(&path, &sheet).unwrap();

        let read_back = read_sheet(&path, "report").unwrap();
        assert_eq!(read_back.row_count(), 3);
        assert_eq!(
            read_back.cell(1, 0).and_then(|c| c.as_str()),
            Some("17-Jan-2022")
        );
        assert_eq!(read_back.cell(1, 1), Some(&CellValue::Number(42.0)));
        assert_eq!(read_back.cell(2, 1), Some(&CellValue::Bool(true)));
    }
}
