//! Trait definitions for the fetcher module.

use async_trait::async_trait;
use std::path::Path;

use super::error::FetchError;
use super::types::FetchedReport;

/// A fetcher that can download report files into a staging directory.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the name of this fetcher implementation.
    fn name(&self) -> &str;

    /// Downloads all configured report files into `staging_dir`.
    ///
    /// Fails fast: the first download error aborts the whole fetch and is
    /// fatal for the run.
    async fn fetch_all(&self, staging_dir: &Path) -> Result<Vec<FetchedReport>, FetchError>;

    /// Validates that the fetcher is properly configured and ready.
    async fn validate(&self) -> Result<(), FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct NoopFetcher;

    #[async_trait]
    impl Fetcher for NoopFetcher {
        fn name(&self) -> &str {
            "noop"
        }

        async fn fetch_all(
            &self,
            staging_dir: &Path,
        ) -> Result<Vec<FetchedReport>, FetchError> {
            Ok(vec![FetchedReport {
                url: "https://example.com/a_20220117.xlsx".to_string(),
                path: staging_dir.join("a_20220117.xlsx"),
                size_bytes: 0,
            }])
        }

        async fn validate(&self) -> Result<(), FetchError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_noop_fetcher() {
        let fetcher = NoopFetcher;
        let fetched = fetcher.fetch_all(Path::new("/tmp/staging")).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(
            fetched[0].path,
            PathBuf::from("/tmp/staging/a_20220117.xlsx")
        );
    }
}
