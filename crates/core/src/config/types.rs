use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fetcher::FetcherConfig;
use crate::merger::MergerConfig;
use crate::placer::PlacerConfig;
use crate::routing::RoutingConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Run cadence label (daily, weekly, monthly). Carried into logs and
    /// the run summary; the actual trigger is external (cron).
    #[serde(default)]
    pub cadence: ReportCadence,
    pub staging: StagingConfig,
    #[serde(default)]
    pub fetcher: Option<FetcherConfig>,
    #[serde(default)]
    pub merger: MergerConfig,
    pub routing: RoutingConfig,
    #[serde(default)]
    pub placer: PlacerConfig,
}

/// Staging directory configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StagingConfig {
    /// Directory where downloaded report parts land and merges happen.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportCadence {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for ReportCadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}
