//! HTTP fetcher implementation.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::config::FetcherConfig;
use super::error::FetchError;
use super::traits::Fetcher;
use super::types::FetchedReport;

/// How many downloads run in flight at once.
const MAX_CONCURRENT_DOWNLOADS: usize = 4;

/// Downloads report files over HTTP(S) with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Create a new HttpFetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Downloads a single URL into the staging directory.
    async fn fetch_one(&self, url: &str, staging_dir: &Path) -> Result<FetchedReport, FetchError> {
        let file_name = file_name_from_url(url)?;
        let dest = staging_dir.join(&file_name);

        debug!(url = url, "Downloading report file");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::RequestFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::RequestFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        tokio::fs::write(&dest, &body)
            .await
            .map_err(|e| FetchError::WriteFailed {
                path: dest.clone(),
                source: e,
            })?;

        info!(
            url = url,
            path = %dest.display(),
            bytes = body.len(),
            "Report file downloaded"
        );

        Ok(FetchedReport {
            url: url.to_string(),
            path: dest,
            size_bytes: body.len() as u64,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self, staging_dir: &Path) -> Result<Vec<FetchedReport>, FetchError> {
        if !staging_dir.is_dir() {
            return Err(FetchError::StagingDirNotFound(staging_dir.to_path_buf()));
        }

        // Downloads run a few at a time; results keep source order.
        stream::iter(self.config.sources.clone())
            .map(|url| async move { self.fetch_one(&url, staging_dir).await })
            .buffered(MAX_CONCURRENT_DOWNLOADS)
            .try_collect()
            .await
    }

    async fn validate(&self) -> Result<(), FetchError> {
        for url in &self.config.sources {
            file_name_from_url(url)?;
        }
        Ok(())
    }
}

/// Extracts the file name from the path component of a URL.
///
/// The name must come from the path: a URL that stops at the authority
/// (`https://example.com`) names no file and is rejected.
fn file_name_from_url(url: &str) -> Result<String, FetchError> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);

    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    let Some((_, path)) = after_scheme.split_once('/') else {
        return Err(FetchError::InvalidUrl(url.to_string()));
    };

    let name = path.rsplit('/').next().unwrap_or("");
    if name.is_empty() || name.contains(':') {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }

    Ok(name.to_string())
}
