pub mod config;
pub mod fetcher;
pub mod merger;
pub mod pipeline;
pub mod placer;
pub mod routing;
pub mod testing;
pub mod workbook;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ReportCadence,
};
pub use fetcher::{FetchError, Fetcher, FetcherConfig, HttpFetcher};
pub use merger::{MergerConfig, MergerError, XlsxMerger};
pub use pipeline::{PipelineError, PipelineRunner, RunSummary};
pub use placer::{FsPlacer, Placer, PlacerConfig, PlacerError};
pub use routing::{DestinationRouter, RoutingConfig, RoutingError};
