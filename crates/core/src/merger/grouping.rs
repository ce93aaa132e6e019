//! Grouping of part files by report entry key.

use regex_lite::Regex;
use std::collections::BTreeMap;

use super::error::MergerError;
use super::types::PartGroup;

/// Extracts the entry key from a report filename: the prefix up to and
/// including the first 8-digit date run.
///
/// `"alpha_report_20220117 (1).xlsx"` -> `Some("alpha_report_20220117")`.
pub fn entry_key(date_run: &Regex, file_name: &str) -> Option<String> {
    date_run
        .find(file_name)
        .map(|m| file_name[..m.end()].to_string())
}

/// Partitions filenames into merge groups keyed by entry.
///
/// Entries represented by two or more files form a group; singletons pass
/// through unmerged. A filename with no entry key is an error, mirroring
/// the rest of the pipeline which routes files by name.
pub fn find_part_groups(
    date_run: &Regex,
    file_names: &[String],
) -> Result<Vec<PartGroup>, MergerError> {
    let mut by_entry: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for name in file_names {
        let entry = entry_key(date_run, name).ok_or_else(|| MergerError::MissingEntryKey {
            file: name.clone(),
        })?;
        by_entry.entry(entry).or_default().push(name.clone());
    }

    Ok(by_entry
        .into_iter()
        .filter(|(_, parts)| parts.len() >= 2)
        .map(|(entry, parts)| PartGroup { entry, parts })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_run() -> Regex {
        Regex::new(r"[0-9]{8}").unwrap()
    }

    #[test]
    fn test_entry_key_extracts_prefix() {
        let re = date_run();
        assert_eq!(
            entry_key(&re, "alpha_report_20220117.xlsx").unwrap(),
            "alpha_report_20220117"
        );
        assert_eq!(
            entry_key(&re, "alpha_report_20220117 (1).xlsx").unwrap(),
            "alpha_report_20220117"
        );
    }

    #[test]
    fn test_entry_key_missing_date() {
        let re = date_run();
        assert!(entry_key(&re, "alpha_report.xlsx").is_none());
        assert!(entry_key(&re, "alpha_2022.xlsx").is_none());
    }

    #[test]
    fn test_entry_key_uses_first_run() {
        let re = date_run();
        assert_eq!(
            entry_key(&re, "a_20220117_b_20220118.xlsx").unwrap(),
            "a_20220117"
        );
    }

    #[test]
    fn test_find_part_groups() {
        let re = date_run();
        let files = vec![
            "alpha_20220117.xlsx".to_string(),
            "alpha_20220117 (1).xlsx".to_string(),
            "beta_20220117.xlsx".to_string(),
        ];

        let groups = find_part_groups(&re, &files).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entry, "alpha_20220117");
        assert_eq!(groups[0].parts.len(), 2);
    }

    #[test]
    fn test_find_part_groups_multiple() {
        let re = date_run();
        let files = vec![
            "a_20220117.xlsx".to_string(),
            "a_20220117 (1).xlsx".to_string(),
            "b_20220118.xlsx".to_string(),
            "b_20220118 (1).xlsx".to_string(),
            "b_20220118 (2).xlsx".to_string(),
        ];

        let groups = find_part_groups(&re, &files).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entry, "a_20220117");
        assert_eq!(groups[1].parts.len(), 3);
    }

    #[test]
    fn test_find_part_groups_unkeyed_file_fails() {
        let re = date_run();
        let files = vec![
            "a_20220117.xlsx".to_string(),
            "no_date_here.xlsx".to_string(),
        ];

        let result = find_part_groups(&re, &files);
        assert!(matches!(
            result,
            Err(MergerError::MissingEntryKey { ref file }) if file == "no_date_here.xlsx"
        ));
    }

    #[test]
    fn test_find_part_groups_all_singletons() {
        let re = date_run();
        let files = vec![
            "a_20220117.xlsx".to_string(),
            "b_20220117.xlsx".to_string(),
        ];

        let groups = find_part_groups(&re, &files).unwrap();
        assert!(groups.is_empty());
    }
}
