//! Tuning knobs for the compaction index

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default number of permanent indices per block
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Block count above which the initial scan runs on the rayon pool
pub const DEFAULT_PARALLEL_BUILD_THRESHOLD: usize = 4096;

const BLOCK_SIZE_ENV: &str = "VLOG_BLOCK_SIZE";
const PARALLEL_THRESHOLD_ENV: &str = "VLOG_PARALLEL_THRESHOLD";

/// Configuration of `ListIntToIntMap`.
///
/// Smaller blocks make `short_index`/`long_index` cheaper (they scan at most one
/// block) at the cost of more Fenwick nodes to touch per update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    pub block_size: usize,
    pub parallel_build_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            parallel_build_threshold: DEFAULT_PARALLEL_BUILD_THRESHOLD,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn parallel_build_threshold(mut self, blocks: usize) -> Self {
        self.parallel_build_threshold = blocks;
        self
    }

    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `VLOG_BLOCK_SIZE` / `VLOG_PARALLEL_THRESHOLD`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = read_env_usize(BLOCK_SIZE_ENV)? {
            config.block_size = value;
        }
        if let Some(value) = read_env_usize(PARALLEL_THRESHOLD_ENV)? {
            config.parallel_build_threshold = value;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(GraphError::InvalidConfig("blockSize must be positive".into()));
        }
        Ok(())
    }
}

fn read_env_usize(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| GraphError::InvalidConfig(format!("{}={:?}: {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.parallel_build_threshold, DEFAULT_PARALLEL_BUILD_THRESHOLD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = IndexConfig::new().block_size(8).parallel_build_threshold(2);
        assert_eq!(config.block_size, 8);
        assert_eq!(config.parallel_build_threshold, 2);
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let config = IndexConfig::new().block_size(0);
        assert!(matches!(config.validate(), Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"blockSize": 16}}"#).unwrap();

        let config = IndexConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.block_size, 16);
        assert_eq!(config.parallel_build_threshold, DEFAULT_PARALLEL_BUILD_THRESHOLD);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"blockSize": 0}}"#).unwrap();
        assert!(IndexConfig::from_json_file(file.path()).is_err());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        assert!(matches!(
            IndexConfig::from_json_file(broken.path()),
            Err(GraphError::Json(_))
        ));
    }
}
