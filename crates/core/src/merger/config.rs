//! Configuration for the merger module.

use serde::{Deserialize, Serialize};

/// Configuration for the workbook merger.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergerConfig {
    /// Worksheet name the reports use. Every part must contain it.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// A1-style address of the cell holding the part's report date.
    #[serde(default = "default_date_cell")]
    pub date_cell: String,

    /// chrono format string for parsing the date cell when it is text.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Header rows to skip on every part after the first when appending.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Chronological order in which parts are concatenated.
    #[serde(default)]
    pub sort: SortOrder,
}

/// Chronological sort order for merge groups.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

fn default_sheet_name() -> String {
    "report".to_string()
}

fn default_date_cell() -> String {
    "A2".to_string()
}

fn default_date_format() -> String {
    "%d-%b-%Y".to_string()
}

fn default_header_rows() -> usize {
    2
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            date_cell: default_date_cell(),
            date_format: default_date_format(),
            header_rows: default_header_rows(),
            sort: SortOrder::default(),
        }
    }
}

impl MergerConfig {
    /// Sets the worksheet name.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Sets the date cell address.
    pub fn with_date_cell(mut self, cell: impl Into<String>) -> Self {
        self.date_cell = cell.into();
        self
    }

    /// Sets the date format string.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the number of header rows skipped on append.
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Sets the chronological sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MergerConfig::default();
        assert_eq!(config.sheet_name, "report");
        assert_eq!(config.date_cell, "A2");
        assert_eq!(config.date_format, "%d-%b-%Y");
        assert_eq!(config.header_rows, 2);
        assert_eq!(config.sort, SortOrder::Descending);
    }

    #[test]
    fn test_config_builder() {
        let config = MergerConfig::default()
            .with_sheet_name("radiology")
            .with_date_cell("B1")
            .with_header_rows(0)
            .with_sort(SortOrder::Ascending);

        assert_eq!(config.sheet_name, "radiology");
        assert_eq!(config.date_cell, "B1");
        assert_eq!(config.header_rows, 0);
        assert_eq!(config.sort, SortOrder::Ascending);
    }

    #[test]
    fn test_deserialize_sort_order() {
        let toml = r#"
sort = "ascending"
"#;
        let config: MergerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sort, SortOrder::Ascending);
    }
}
