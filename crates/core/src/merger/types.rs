//! Types for the merger module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A group of part files that belong to the same report entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartGroup {
    /// Entry key shared by all parts (filename prefix up to and including
    /// the 8-digit date run).
    pub entry: String,
    /// Part filenames, in scan order.
    pub parts: Vec<String>,
}

/// Result of merging one part group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Entry key of the group.
    pub entry: String,
    /// Path of the merged workbook.
    pub output_path: PathBuf,
    /// Part filenames that were consumed, in merge order.
    pub parts: Vec<String>,
    /// Rows in the merged sheet.
    pub rows_written: usize,
}

/// Summary of a merge pass over the staging directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Outcomes per merged group.
    pub outcomes: Vec<MergeOutcome>,
    /// Number of groups merged.
    pub groups_merged: usize,
    /// Number of part files consumed and deleted.
    pub parts_consumed: usize,
}

impl MergeSummary {
    pub fn new(outcomes: Vec<MergeOutcome>) -> Self {
        let groups_merged = outcomes.len();
        let parts_consumed = outcomes.iter().map(|o| o.parts.len()).sum();
        Self {
            outcomes,
            groups_merged,
            parts_consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_summary_counts() {
        let summary = MergeSummary::new(vec![
            MergeOutcome {
                entry: "a_20220117".to_string(),
                output_path: PathBuf::from("/staging/a_20220117.xlsx"),
                parts: vec!["a_20220117.xlsx".to_string(), "a_20220117 (1).xlsx".to_string()],
                rows_written: 10,
            },
            MergeOutcome {
                entry: "b_20220117".to_string(),
                output_path: PathBuf::from("/staging/b_20220117.xlsx"),
                parts: vec![
                    "b_20220117.xlsx".to_string(),
                    "b_20220117 (1).xlsx".to_string(),
                    "b_20220117 (2).xlsx".to_string(),
                ],
                rows_written: 15,
            },
        ]);

        assert_eq!(summary.groups_merged, 2);
        assert_eq!(summary.parts_consumed, 5);
    }

    #[test]
    fn test_merge_summary_empty() {
        let summary = MergeSummary::new(Vec::new());
        assert_eq!(summary.groups_merged, 0);
        assert_eq!(summary.parts_consumed, 0);
    }
}
