//! Configuration for the placer module.

use serde::{Deserialize, Serialize};

/// Configuration for the file system placer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacerConfig {
    /// Buffer size for file copies in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Whether to use atomic moves when possible.
    #[serde(default = "default_true")]
    pub prefer_atomic_moves: bool,

    /// Whether to verify checksums after copying.
    #[serde(default)]
    pub verify_checksums: bool,

    /// Whether to delete staging files after placement. The default keeps
    /// them, matching a copy-style distribution run.
    #[serde(default)]
    pub cleanup_sources: bool,

    /// Whether to create missing destination directories. Off by default:
    /// a missing destination folder usually means a misconfigured route,
    /// not a new project.
    #[serde(default)]
    pub create_parents: bool,

    /// Whether to overwrite existing destination files.
    #[serde(default)]
    pub overwrite: bool,
}

fn default_buffer_size() -> usize {
    8 * 1024 * 1024 // 8 MB
}

fn default_true() -> bool {
    true
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            prefer_atomic_moves: true,
            verify_checksums: false,
            cleanup_sources: false,
            create_parents: false,
            overwrite: false,
        }
    }
}

impl PlacerConfig {
    /// Creates a new config with atomic moves enabled.
    pub fn with_atomic_moves(mut self, enabled: bool) -> Self {
        self.prefer_atomic_moves = enabled;
        self
    }

    /// Enables checksum verification.
    pub fn with_checksum_verification(mut self, enabled: bool) -> Self {
        self.verify_checksums = enabled;
        self
    }

    /// Enables source cleanup.
    pub fn with_cleanup(mut self, enabled: bool) -> Self {
        self.cleanup_sources = enabled;
        self
    }

    /// Enables creation of missing destination directories.
    pub fn with_create_parents(mut self, enabled: bool) -> Self {
        self.create_parents = enabled;
        self
    }

    /// Enables overwriting of existing destination files.
    pub fn with_overwrite(mut self, enabled: bool) -> Self {
        self.overwrite = enabled;
        self
    }

    /// Sets the buffer size for copies.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlacerConfig::default();
        assert_eq!(config.buffer_size, 8 * 1024 * 1024);
        assert!(config.prefer_atomic_moves);
        assert!(!config.verify_checksums);
        assert!(!config.create_parents);
        assert!(!config.overwrite);
    }

    #[test]
    fn test_config_builder() {
        let config = PlacerConfig::default()
            .with_atomic_moves(false)
            .with_checksum_verification(true)
            .with_cleanup(true)
            .with_create_parents(true)
            .with_buffer_size(1024 * 1024);

        assert!(!config.prefer_atomic_moves);
        assert!(config.verify_checksums);
        assert!(config.cleanup_sources);
        assert!(config.create_parents);
        assert_eq!(config.buffer_size, 1024 * 1024);
    }
}
