//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external-facing traits
//! so pipeline tests can run without network access or real destination
//! trees.
//!
//! # Example
//!
//! ```rust,ignore
//! use reportino_core::testing::{MockFetcher, MockPlacer};
//!
//! let fetcher = MockFetcher::new();
//! fetcher.add_report("https://example.com/a_20220117.xlsx", b"bytes").await;
//!
//! let placer = MockPlacer::new();
//!
//! // Use in a PipelineRunner...
//! ```

mod mock_fetcher;
mod mock_placer;

pub use mock_fetcher::MockFetcher;
pub use mock_placer::MockPlacer;
