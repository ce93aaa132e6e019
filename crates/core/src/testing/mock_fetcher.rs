//! Mock fetcher for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchedReport, Fetcher};

/// Mock implementation of the Fetcher trait.
///
/// Instead of going over the network it writes pre-configured report bodies
/// into the staging directory, deriving filenames from the URLs the same
/// way the HTTP fetcher does.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    /// Configured (url, body) pairs to deposit into staging.
    reports: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
    /// If set, fetch_all fails with this message.
    failure: Arc<RwLock<Option<String>>>,
    /// Number of fetch_all calls.
    calls: Arc<RwLock<usize>>,
}

impl MockFetcher {
    /// Create a new mock fetcher with no reports configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a report body to deposit on the next fetch.
    pub async fn add_report(&self, url: &str, body: &[u8]) {
        self.reports
            .write()
            .await
            .push((url.to_string(), body.to_vec()));
    }

    /// Makes fetch_all fail with the given reason.
    pub async fn fail_with(&self, reason: &str) {
        *self.failure.write().await = Some(reason.to_string());
    }

    /// Number of times fetch_all was invoked.
    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_all(&self, staging_dir: &Path) -> Result<Vec<FetchedReport>, FetchError> {
        *self.calls.write().await += 1;

        if let Some(reason) = self.failure.read().await.clone() {
            return Err(FetchError::RequestFailed {
                url: "mock://".to_string(),
                reason,
            });
        }

        if !staging_dir.is_dir() {
            return Err(FetchError::StagingDirNotFound(staging_dir.to_path_buf()));
        }

        let mut fetched = Vec::new();
        for (url, body) in self.reports.read().await.iter() {
            let name = url
                .rsplit('/')
                .next()
                .filter(|n| !n.is_empty())
                .ok_or_else(|| FetchError::InvalidUrl(url.clone()))?;
            let path = staging_dir.join(name);
            tokio::fs::write(&path, body)
                .await
                .map_err(|e| FetchError::WriteFailed {
                    path: path.clone(),
                    source: e,
                })?;
            fetched.push(FetchedReport {
                url: url.clone(),
                path,
                size_bytes: body.len() as u64,
            });
        }

        Ok(fetched)
    }

    async fn validate(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_fetcher_deposits_files() {
        let temp = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        fetcher
            .add_report("https://example.com/a_20220117.xlsx", b"body")
            .await;

        let fetched = fetcher.fetch_all(temp.path()).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert!(temp.path().join("a_20220117.xlsx").exists());
        assert_eq!(fetcher.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_fetcher_failure() {
        let temp = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        fetcher.fail_with("boom").await;

        let result = fetcher.fetch_all(temp.path()).await;
        assert!(matches!(result, Err(FetchError::RequestFailed { .. })));
    }
}
