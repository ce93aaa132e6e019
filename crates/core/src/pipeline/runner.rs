//! Pipeline runner implementation.

use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};
use crate::merger::{MergerError, XlsxMerger};
use crate::placer::{ChecksumType, FilePlacement, PlacementJob, Placer, PlacerError};
use crate::routing::{DestinationRouter, RoutingError};

use super::types::RunSummary;

/// Error type for pipeline runs.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The fetch phase failed.
    #[error("Fetch phase failed: {0}")]
    Fetch(#[from] FetchError),

    /// The merge phase failed.
    #[error("Merge phase failed: {0}")]
    Merge(#[from] MergerError),

    /// A report file could not be routed to a destination.
    #[error("Routing failed: {0}")]
    Routing(#[from] RoutingError),

    /// The place phase failed.
    #[error("Place phase failed: {0}")]
    Placement(#[from] PlacerError),
}

/// Runs the fetch -> merge -> place pipeline once per call.
pub struct PipelineRunner<F: Fetcher, P: Placer> {
    config: Config,
    fetcher: Option<Arc<F>>,
    merger: XlsxMerger,
    router: DestinationRouter,
    placer: Arc<P>,
}

impl<F: Fetcher, P: Placer> PipelineRunner<F, P> {
    /// Creates a new runner without a fetch phase.
    pub fn new(config: Config, placer: P) -> Self {
        let merger = XlsxMerger::new(config.merger.clone());
        let router = DestinationRouter::new(config.routing.clone());
        Self {
            config,
            fetcher: None,
            merger,
            router,
            placer: Arc::new(placer),
        }
    }

    /// Adds a fetcher, enabling the fetch phase.
    pub fn with_fetcher(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Executes one full pipeline pass.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let staging = self.config.staging.dir.as_path();

        info!(
            run_id = %run_id,
            cadence = %self.config.cadence,
            staging = %staging.display(),
            "Starting report pipeline run"
        );

        // Phase 1: fetch
        let files_fetched = match &self.fetcher {
            Some(fetcher) => {
                let fetched = fetcher.fetch_all(staging).await?;
                info!(count = fetched.len(), "Fetch phase complete");
                fetched.len()
            }
            None => {
                info!("No fetcher configured, using staging directory as-is");
                0
            }
        };

        // Phase 2: merge
        let merge_summary = self.merger.merge_all(staging).await?;
        info!(
            groups = merge_summary.groups_merged,
            parts = merge_summary.parts_consumed,
            "Merge phase complete"
        );

        // Phase 3: route and place everything left in staging
        let reports = self.merger.scan_staging(staging).await?;
        let mut files = Vec::with_capacity(reports.len());
        for name in &reports {
            let dest_dir = self.router.route(name)?;
            let dest_name = self.router.rename(name);
            files.push(FilePlacement {
                report_id: name.strip_suffix(".xlsx").unwrap_or(name).to_string(),
                source: staging.join(name),
                destination: dest_dir.join(dest_name),
                overwrite: self.config.placer.overwrite,
                verify_checksum: self
                    .config
                    .placer
                    .verify_checksums
                    .then_some(ChecksumType::Sha256),
            });
        }

        let placement = self
            .placer
            .place(PlacementJob {
                job_id: run_id.clone(),
                files,
                cleanup_sources: self.config.placer.cleanup_sources,
                enable_rollback: true,
            })
            .await?;

        let summary = RunSummary {
            run_id,
            cadence: self.config.cadence,
            files_fetched,
            groups_merged: merge_summary.groups_merged,
            parts_consumed: merge_summary.parts_consumed,
            files_placed: placement.files_placed.len(),
            total_bytes_placed: placement.total_bytes,
            duration_ms: start.elapsed().as_millis() as u64,
            merge_outcomes: merge_summary.outcomes,
            placed: placement.files_placed,
        };

        info!(
            run_id = %summary.run_id,
            files_placed = summary.files_placed,
            duration_ms = summary.duration_ms,
            "Pipeline run complete"
        );

        Ok(summary)
    }
}
