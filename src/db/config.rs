//! Database configuration
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DbError, DbResult};
use crate::observability::Severity;

/// Largest page a retrieval query may return
pub const MAX_PAGE_SIZE: usize = 200;

/// memdb configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    /// Ceiling for `limit`, in `1..=200`; out-of-range limits are replaced
    /// by it (default: 200)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Lowest severity written by the logger (default: warn)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
            log_level: default_log_level(),
        }
    }
}

impl DbConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> DbResult<Self> {
        let config: DbConfig =
            serde_json::from_str(json).map_err(|e| DbError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| DbError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Create a config with the given log level
    pub fn with_log_level(log_level: Severity) -> Self {
        Self {
            log_level,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> DbResult<()> {
        if self.max_page_size == 0 || self.max_page_size > MAX_PAGE_SIZE {
            return Err(DbError::InvalidConfig(format!(
                "max_page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.max_page_size
            )));
        }
        Ok(())
    }
}
