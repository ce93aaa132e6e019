//! Fetcher module for downloading report files into staging.
//!
//! This module provides the `Fetcher` trait and the HTTP implementation
//! that downloads a configured list of report URLs into the staging
//! directory. A failed download is fatal for the run; there is no retry or
//! backoff, only a per-request timeout.
//!
//! The fetch phase is optional: when no `[fetcher]` section is configured
//! the staging directory is expected to be populated by hand.

mod config;
mod error;
mod http;
mod traits;
mod types;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use http::HttpFetcher;
pub use traits::Fetcher;
pub use types::FetchedReport;
