//! Destination routing for report files.
//!
//! Every report file is routed by its *project identifier*: the first two
//! `_`-separated segments of the filename, joined and lowercased
//! (`ALPHA_SALES_20220117.xlsx` -> `alpha_sales`). Resolution checks the
//! explicit per-project destination map first and falls back to the
//! configured template root, `<root>/<project_id>[/<subpath>]`.
//!
//! Filename rewrite rules (plain substring replacements) are applied to the
//! destination filename only; the staging copy keeps its original name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Routing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Template root: files route to `<root>/<project_id>[/<subpath>]`
    /// unless an explicit destination matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Path appended under the per-project directory of the template root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<PathBuf>,

    /// Explicit destination directories keyed by project identifier.
    #[serde(default)]
    pub destinations: BTreeMap<String, PathBuf>,

    /// Filename rewrite rules applied to the destination filename.
    #[serde(default)]
    pub rename: Vec<RenameRule>,
}

/// A substring replacement applied to destination filenames.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

/// Errors that can occur while routing a report file.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No explicit destination and no template root cover this project.
    #[error("No destination for report {file} (project '{project_id}')")]
    Unroutable { file: String, project_id: String },
}

/// Resolves destination directories and output filenames for report files.
#[derive(Debug, Clone)]
pub struct DestinationRouter {
    config: RoutingConfig,
}

impl DestinationRouter {
    /// Creates a new router with the given configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Derives the project identifier from a report filename.
    pub fn project_identifier(file_name: &str) -> String {
        let parts: Vec<&str> = file_name.split('_').take(2).collect();
        parts.join("_").to_lowercase()
    }

    /// Resolves the destination directory for a report filename.
    pub fn route(&self, file_name: &str) -> Result<PathBuf, RoutingError> {
        let project_id = Self::project_identifier(file_name);

        if let Some(dest) = self.config.destinations.get(&project_id) {
            return Ok(dest.clone());
        }

        if let Some(root) = &self.config.root {
            let mut dest = root.join(&project_id);
            if let Some(subpath) = &self.config.subpath {
                dest = dest.join(subpath);
            }
            return Ok(dest);
        }

        Err(RoutingError::Unroutable {
            file: file_name.to_string(),
            project_id,
        })
    }

    /// Applies the configured rewrite rules to a destination filename.
    pub fn rename(&self, file_name: &str) -> String {
        self.config
            .rename
            .iter()
            .fold(file_name.to_string(), |name, rule| {
                name.replace(&rule.from, &rule.to)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_identifier() {
        assert_eq!(
            DestinationRouter::project_identifier("ALPHA_SALES_20220117.xlsx"),
            "alpha_sales"
        );
        assert_eq!(
            DestinationRouter::project_identifier("beta_ops_20220118 (1).xlsx"),
            "beta_ops"
        );
    }

    #[test]
    fn test_project_identifier_single_segment() {
        // No underscore: the whole filename is the identifier, as in the
        // original naming convention this tool expects.
        assert_eq!(
            DestinationRouter::project_identifier("report.xlsx"),
            "report.xlsx"
        );
    }

    #[test]
    fn test_route_explicit_destination_wins() {
        let mut destinations = BTreeMap::new();
        destinations.insert(
            "alpha_sales".to_string(),
            PathBuf::from("/srv/reports/special/alpha"),
        );
        let router = DestinationRouter::new(RoutingConfig {
            root: Some(PathBuf::from("/srv/reports")),
            subpath: None,
            destinations,
            rename: Vec::new(),
        });

        assert_eq!(
            router.route("ALPHA_SALES_20220117.xlsx").unwrap(),
            PathBuf::from("/srv/reports/special/alpha")
        );
    }

    #[test]
    fn test_route_template_fallback() {
        let router = DestinationRouter::new(RoutingConfig {
            root: Some(PathBuf::from("/srv/reports")),
            subpath: Some(PathBuf::from("incoming/daily")),
            destinations: BTreeMap::new(),
            rename: Vec::new(),
        });

        assert_eq!(
            router.route("beta_ops_20220118.xlsx").unwrap(),
            PathBuf::from("/srv/reports/beta_ops/incoming/daily")
        );
    }

    #[test]
    fn test_route_unroutable() {
        let router = DestinationRouter::new(RoutingConfig::default());
        let result = router.route("beta_ops_20220118.xlsx");
        assert!(matches!(
            result,
            Err(RoutingError::Unroutable { ref project_id, .. }) if project_id == "beta_ops"
        ));
    }

    #[test]
    fn test_rename_rules_apply_in_order() {
        let router = DestinationRouter::new(RoutingConfig {
            root: None,
            subpath: None,
            destinations: BTreeMap::new(),
            rename: vec![
                RenameRule {
                    from: "_draft_".to_string(),
                    to: "_final_".to_string(),
                },
                RenameRule {
                    from: "_final_".to_string(),
                    to: "_published_".to_string(),
                },
            ],
        });

        assert_eq!(
            router.rename("alpha_draft_20220117.xlsx"),
            "alpha_published_20220117.xlsx"
        );
    }

    #[test]
    fn test_rename_no_rules_is_identity() {
        let router = DestinationRouter::new(RoutingConfig::default());
        assert_eq!(router.rename("a_20220117.xlsx"), "a_20220117.xlsx");
    }
}
