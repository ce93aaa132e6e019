//! Workbook merger implementation.

use chrono::NaiveDate;
use regex_lite::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::workbook::{parse_cell_address, read_sheet, write_sheet, CellValue, Sheet};

use super::config::{MergerConfig, SortOrder};
use super::error::MergerError;
use super::grouping::find_part_groups;
use super::types::{MergeOutcome, MergeSummary, PartGroup};

/// Merges partial `.xlsx` reports in a staging directory.
pub struct XlsxMerger {
    config: MergerConfig,
    date_run: Regex,
}

impl XlsxMerger {
    /// Creates a new merger with the given configuration.
    pub fn new(config: MergerConfig) -> Self {
        // The pattern is static, it cannot fail to compile.
        let date_run = Regex::new(r"[0-9]{8}").expect("invalid entry key pattern");
        Self { config, date_run }
    }

    /// Creates a merger with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MergerConfig::default())
    }

    /// Lists `.xlsx` regular files in the staging directory, sorted by name.
    pub async fn scan_staging(&self, staging_dir: &Path) -> Result<Vec<String>, MergerError> {
        if !staging_dir.is_dir() {
            return Err(MergerError::StagingDirNotFound(staging_dir.to_path_buf()));
        }

        let mut entries = fs::read_dir(staging_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".xlsx") {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Merges every part group found in the staging directory.
    ///
    /// Consumed parts are deleted; each group's merged workbook lands at
    /// `staging/<entry>.xlsx`. Files that belong to no group are left
    /// untouched.
    pub async fn merge_all(&self, staging_dir: &Path) -> Result<MergeSummary, MergerError> {
        let files = self.scan_staging(staging_dir).await?;
        let groups = find_part_groups(&self.date_run, &files)?;

        if groups.is_empty() {
            debug!("No partial report groups in staging");
            return Ok(MergeSummary::new(Vec::new()));
        }

        let mut outcomes = Vec::with_capacity(groups.len());
        for group in &groups {
            info!(
                entry = %group.entry,
                parts = group.parts.len(),
                "Starting collation of partial report group"
            );
            outcomes.push(self.merge_group(staging_dir, group).await?);
        }

        Ok(MergeSummary::new(outcomes))
    }

    /// Merges a single part group.
    ///
    /// Parts are loaded fully before anything is deleted, so a malformed
    /// part aborts the merge without touching the staging directory.
    pub async fn merge_group(
        &self,
        staging_dir: &Path,
        group: &PartGroup,
    ) -> Result<MergeOutcome, MergerError> {
        // Load every part and its report date.
        let mut dated: Vec<(NaiveDate, String, Sheet)> = Vec::with_capacity(group.parts.len());
        let mut seen_dates: HashSet<NaiveDate> = HashSet::new();

        for part in &group.parts {
            let path = staging_dir.join(part);
            debug!(file = %part, "Loading report part");
            let sheet = self.load_sheet(path).await?;
            let date = self.part_date(part, &sheet)?;

            if !seen_dates.insert(date) {
                return Err(MergerError::DuplicateDate {
                    entry: group.entry.clone(),
                    date,
                });
            }
            dated.push((date, part.clone(), sheet));
        }

        match self.config.sort {
            SortOrder::Ascending => dated.sort_by_key(|(date, _, _)| *date),
            SortOrder::Descending => dated.sort_by_key(|(date, _, _)| std::cmp::Reverse(*date)),
        }

        // First part goes in whole, the rest contribute their data rows.
        let mut parts_in_order = Vec::with_capacity(dated.len());
        let mut iter = dated.into_iter();
        let Some((_, first_name, mut merged)) = iter.next() else {
            return Err(MergerError::EmptyGroup(group.entry.clone()));
        };
        parts_in_order.push(first_name);

        for (_, name, sheet) in iter {
            merged.append_rows(sheet.data_rows(self.config.header_rows));
            parts_in_order.push(name);
        }

        // Delete the consumed parts before writing: the output may reuse
        // the name of the first part.
        for part in &group.parts {
            let path = staging_dir.join(part);
            debug!(file = %part, "Removing consumed report part");
            fs::remove_file(&path).await?;
        }

        let output_path = staging_dir.join(format!("{}.xlsx", group.entry));
        let rows_written = merged.row_count();
        self.store_sheet(output_path.clone(), merged).await?;

        info!(
            entry = %group.entry,
            output = %output_path.display(),
            rows = rows_written,
            "Merged partial report group"
        );

        Ok(MergeOutcome {
            entry: group.entry.clone(),
            output_path,
            parts: parts_in_order,
            rows_written,
        })
    }

    /// Reads the report date from the configured cell of a part.
    fn part_date(&self, file: &str, sheet: &Sheet) -> Result<NaiveDate, MergerError> {
        let (row, col) = parse_cell_address(&self.config.date_cell)?;
        let cell = sheet.cell(row, col).unwrap_or(&CellValue::Empty);

        match cell {
            CellValue::String(s) => NaiveDate::parse_from_str(s.trim(), &self.config.date_format)
                .map_err(|e| MergerError::DateParse {
                    file: file.to_string(),
                    cell: self.config.date_cell.clone(),
                    value: s.clone(),
                    source: e,
                }),
            CellValue::DateTime(dt) => Ok(dt.date()),
            CellValue::Empty => Err(MergerError::DateCellMissing {
                file: file.to_string(),
                cell: self.config.date_cell.clone(),
            }),
            _ => Err(MergerError::DateCellInvalid {
                file: file.to_string(),
                cell: self.config.date_cell.clone(),
            }),
        }
    }

    /// Reads a worksheet on the blocking pool.
    async fn load_sheet(&self, path: PathBuf) -> Result<Sheet, MergerError> {
        let sheet_name = self.config.sheet_name.clone();
        tokio::task::spawn_blocking(move || read_sheet(&path, &sheet_name))
            .await
            .map_err(|e| MergerError::TaskFailed(e.to_string()))?
            .map_err(MergerError::from)
    }

    /// Writes a worksheet on the blocking pool.
    async fn store_sheet(&self, path: PathBuf, sheet: Sheet) -> Result<(), MergerError> {
        tokio::task::spawn_blocking(move || write_sheet(&path, &sheet))
            .await
            .map_err(|e| MergerError::TaskFailed(e.to_string()))?
            .map_err(MergerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writes a part file with a header row, a date cell at A2 and `data_rows`
    /// further rows.
    fn write_part(dir: &Path, name: &str, date: &str, data_rows: usize) {
        let mut sheet = Sheet::new("report");
        sheet.rows.push(vec![
            CellValue::String("date".into()),
            CellValue::String("value".into()),
        ]);
        sheet.rows.push(vec![
            CellValue::String(date.into()),
            CellValue::Number(0.0),
        ]);
        for i in 0..data_rows {
            sheet.rows.push(vec![
                CellValue::String(date.into()),
                CellValue::Number(i as f64),
            ]);
        }
        write_sheet(&dir.join(name), &sheet).unwrap();
    }

    #[tokio::test]
    async fn test_scan_staging_filters_xlsx() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);
        std::fs::write(temp.path().join("notes.txt"), b"ignore me").unwrap();
        std::fs::create_dir(temp.path().join("sub.xlsx")).unwrap();

        let merger = XlsxMerger::with_defaults();
        let names = merger.scan_staging(temp.path()).await.unwrap();
        assert_eq!(names, vec!["a_20220117.xlsx".to_string()]);
    }

    #[tokio::test]
    async fn test_scan_staging_missing_dir() {
        let merger = XlsxMerger::with_defaults();
        let result = merger.scan_staging(Path::new("/nonexistent/staging")).await;
        assert!(matches!(result, Err(MergerError::StagingDirNotFound(_))));
    }

    #[tokio::test]
    async fn test_merge_group_concatenates_rows() {
        let temp = TempDir::new().unwrap();
        // Part layout: 1 header row + date row + 3 data rows = 5 rows.
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 3);
        write_part(temp.path(), "a_20220117 (1).xlsx", "16-Jan-2022", 3);

        let merger = XlsxMerger::with_defaults();
        let summary = merger.merge_all(temp.path()).await.unwrap();

        assert_eq!(summary.groups_merged, 1);
        assert_eq!(summary.parts_consumed, 2);

        let outcome = &summary.outcomes[0];
        assert_eq!(outcome.entry, "a_20220117");
        // First part whole (5 rows) + second part minus 2 header rows (3 rows).
        assert_eq!(outcome.rows_written, 8);

        // Parts are gone, merged output exists.
        assert!(!temp.path().join("a_20220117 (1).xlsx").exists());
        assert!(temp.path().join("a_20220117.xlsx").exists());

        let merged = read_sheet(&outcome.output_path, "report").unwrap();
        assert_eq!(merged.row_count(), 8);
        // Descending default order: the newest part (17-Jan) leads.
        assert_eq!(
            merged.cell(1, 0).and_then(|c| c.as_str()),
            Some("17-Jan-2022")
        );
        assert_eq!(
            merged.cell(5, 0).and_then(|c| c.as_str()),
            Some("16-Jan-2022")
        );
    }

    #[tokio::test]
    async fn test_merge_sum_property_with_no_header_rows() {
        let temp = TempDir::new().unwrap();
        // Two 5-row parts merged with header_rows = 0 make a 10-row output.
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 3);
        write_part(temp.path(), "a_20220117 (1).xlsx", "16-Jan-2022", 3);

        let merger = XlsxMerger::new(MergerConfig::default().with_header_rows(0));
        let summary = merger.merge_all(temp.path()).await.unwrap();
        assert_eq!(summary.outcomes[0].rows_written, 10);
    }

    #[tokio::test]
    async fn test_merge_ascending_order() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);
        write_part(temp.path(), "a_20220117 (1).xlsx", "16-Jan-2022", 1);

        let merger = XlsxMerger::new(MergerConfig::default().with_sort(SortOrder::Ascending));
        let summary = merger.merge_all(temp.path()).await.unwrap();

        let merged = read_sheet(&summary.outcomes[0].output_path, "report").unwrap();
        assert_eq!(
            merged.cell(1, 0).and_then(|c| c.as_str()),
            Some("16-Jan-2022")
        );
    }

    #[tokio::test]
    async fn test_merge_duplicate_date_fails() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);
        write_part(temp.path(), "a_20220117 (1).xlsx", "17-Jan-2022", 1);

        let merger = XlsxMerger::with_defaults();
        let result = merger.merge_all(temp.path()).await;
        assert!(matches!(result, Err(MergerError::DuplicateDate { .. })));

        // Nothing was deleted.
        assert!(temp.path().join("a_20220117 (1).xlsx").exists());
    }

    #[tokio::test]
    async fn test_merge_unparsable_date_fails() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);
        write_part(temp.path(), "a_20220117 (1).xlsx", "not a date", 1);

        let merger = XlsxMerger::with_defaults();
        let result = merger.merge_all(temp.path()).await;
        assert!(matches!(result, Err(MergerError::DateParse { .. })));
    }

    #[tokio::test]
    async fn test_merge_missing_sheet_fails() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);
        write_part(temp.path(), "a_20220117 (1).xlsx", "16-Jan-2022", 1);

        let merger = XlsxMerger::new(MergerConfig::default().with_sheet_name("other"));
        let result = merger.merge_all(temp.path()).await;
        assert!(matches!(result, Err(MergerError::Workbook(_))));
    }

    #[tokio::test]
    async fn test_merge_group_without_parts_is_error() {
        let temp = TempDir::new().unwrap();
        let merger = XlsxMerger::with_defaults();

        let group = PartGroup {
            entry: "a_20220117".to_string(),
            parts: Vec::new(),
        };
        let result = merger.merge_group(temp.path(), &group).await;
        assert!(matches!(result, Err(MergerError::EmptyGroup(_))));
    }

    #[tokio::test]
    async fn test_merge_leaves_singletons_alone() {
        let temp = TempDir::new().unwrap();
        write_part(temp.path(), "a_20220117.xlsx", "17-Jan-2022", 1);

        let merger = XlsxMerger::with_defaults();
        let summary = merger.merge_all(temp.path()).await.unwrap();
        assert_eq!(summary.groups_merged, 0);
        assert!(temp.path().join("a_20220117.xlsx").exists());
    }
}
