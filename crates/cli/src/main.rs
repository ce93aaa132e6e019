use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reportino_core::{load_config, validate_config, FsPlacer, HttpFetcher, PipelineRunner};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plain-text run log, one file per calendar day next to the binary.
fn run_log_file() -> String {
    format!("reportino-{}.log", chrono::Local::now().format("%Y%m%d"))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging to stdout and to the run log file
    let log_path = run_log_file();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open run log {log_path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    info!("Starting reportino {} report run", VERSION);

    // Determine config path
    let config_path = std::env::var("REPORTINO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Cadence: {}", config.cadence);
    info!("Staging directory: {:?}", config.staging.dir);

    let placer = FsPlacer::new(config.placer.clone());
    let fetcher = config.fetcher.clone().map(HttpFetcher::new);
    match &fetcher {
        Some(_) => info!("HTTP fetcher configured"),
        None => info!("No fetcher configured, staging is used as-is"),
    }

    let mut runner = PipelineRunner::new(config, placer);
    if let Some(fetcher) = fetcher {
        runner = runner.with_fetcher(fetcher);
    }

    let summary = runner.run().await.context("Pipeline run failed")?;

    info!(
        run_id = %summary.run_id,
        files_fetched = summary.files_fetched,
        groups_merged = summary.groups_merged,
        parts_consumed = summary.parts_consumed,
        files_placed = summary.files_placed,
        total_bytes_placed = summary.total_bytes_placed,
        duration_ms = summary.duration_ms,
        "Run summary"
    );

    if let Ok(json) = serde_json::to_string(&summary) {
        debug!(summary = %json, "Full run summary");
    }

    Ok(())
}
