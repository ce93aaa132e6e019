//! The report pipeline: fetch, merge, place.
//!
//! One `run()` call does one complete pass, strictly in order:
//!
//! 1. download the configured report files into staging (skipped when no
//!    fetcher is configured),
//! 2. collate partial report groups into merged workbooks,
//! 3. route every remaining `.xlsx` in staging to its destination folder
//!    and place it.
//!
//! There is no queue, no pool and no retry: the first failing phase aborts
//! the run and the operator re-runs after fixing the cause. The external
//! scheduler (cron) decides when runs happen.
//!
//! # Example
//!
//! ```ignore
//! use reportino_core::pipeline::PipelineRunner;
//! use reportino_core::placer::FsPlacer;
//!
//! let runner = PipelineRunner::new(config, FsPlacer::with_defaults());
//! let summary = runner.run().await?;
//! println!("Placed {} reports", summary.files_placed);
//! ```

mod runner;
mod types;

pub use runner::{PipelineError, PipelineRunner};
pub use types::RunSummary;
