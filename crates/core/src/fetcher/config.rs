//! Configuration for the fetcher module.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP report fetcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    /// Report file URLs to download, one file per URL.
    pub sources: Vec<String>,

    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_default_timeout() {
        let toml = r#"
sources = ["https://reports.example.com/alpha_20220117.xlsx"]
"#;
        let config: FetcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_deserialize_custom_timeout() {
        let toml = r#"
sources = []
timeout_secs = 120
"#;
        let config: FetcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout_secs, 120);
    }
}
