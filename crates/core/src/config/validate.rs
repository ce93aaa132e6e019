use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Staging directory path is not empty
/// - Fetcher sources are non-empty and well-formed when the section exists
/// - Merger sheet name, date cell and date format are not empty
/// - Routing has at least one way to resolve a destination
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Staging validation
    if config.staging.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "staging.dir cannot be empty".to_string(),
        ));
    }

    // Fetcher validation
    if let Some(fetcher) = &config.fetcher {
        if fetcher.sources.is_empty() {
            return Err(ConfigError::ValidationError(
                "fetcher.sources cannot be empty when the [fetcher] section is present"
                    .to_string(),
            ));
        }
        for source in &fetcher.sources {
            if !source.starts_with("http://") && !source.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "fetcher source is not an http(s) URL: {source}"
                )));
            }
        }
        if fetcher.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "fetcher.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    // Merger validation
    if config.merger.sheet_name.is_empty() {
        return Err(ConfigError::ValidationError(
            "merger.sheet_name cannot be empty".to_string(),
        ));
    }
    if config.merger.date_cell.is_empty() {
        return Err(ConfigError::ValidationError(
            "merger.date_cell cannot be empty".to_string(),
        ));
    }
    if config.merger.date_format.is_empty() {
        return Err(ConfigError::ValidationError(
            "merger.date_format cannot be empty".to_string(),
        ));
    }

    // Routing validation: without a template root or an explicit mapping no
    // file can ever be routed.
    if config.routing.root.is_none() && config.routing.destinations.is_empty() {
        return Err(ConfigError::ValidationError(
            "routing needs either routing.root or at least one [routing.destinations] entry"
                .to_string(),
        ));
    }

    Ok(())
}
