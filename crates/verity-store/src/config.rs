//! Configuration for the news store
//!
//! Defines page sizes, the comment inference window and the storage keys
//! session data lives under.

use crate::error::StoreError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use verity_domain::DEFAULT_INFERENCE_TOLERANCE_MS;

/// Storage key for persisted session votes
pub const DEFAULT_VOTES_KEY: &str = "afn.v1.votes";

/// Storage key for persisted session comments
pub const DEFAULT_COMMENTS_KEY: &str = "afn.v1.comments";

/// Storage key for the recoverable error log
pub const DEFAULT_ERROR_LOG_KEY: &str = "errorLog";

/// Configuration for [`crate::NewsStore`]
///
/// Every field has a default, so a partial TOML table is valid.
///
/// # Examples
///
/// ```
/// use verity_store::StoreConfig;
///
/// let config = StoreConfig::from_toml_str("list_page_size = 5").unwrap();
/// assert_eq!(config.list_page_size, 5);
/// assert_eq!(config.comments_page_size, 5);
/// assert_eq!(config.votes_key, "afn.v1.votes");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial news list page size
    /// Default: 10
    pub list_page_size: usize,

    /// Comments shown per page on a news item's detail view
    /// Default: 5
    pub comments_page_size: usize,

    /// Window for matching a flagless comment to a vote, in milliseconds
    /// Default: 2000
    pub inference_tolerance_ms: i64,

    /// Storage key for session votes
    pub votes_key: String,

    /// Storage key for session comments
    pub comments_key: String,

    /// Storage key for the error log
    pub error_log_key: String,

    /// Maximum number of entries kept in the error log
    /// Default: 100
    pub error_log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            list_page_size: 10,
            comments_page_size: 5,
            inference_tolerance_ms: DEFAULT_INFERENCE_TOLERANCE_MS,
            votes_key: DEFAULT_VOTES_KEY.to_string(),
            comments_key: DEFAULT_COMMENTS_KEY.to_string(),
            error_log_key: DEFAULT_ERROR_LOG_KEY.to_string(),
            error_log_capacity: 100,
        }
    }
}

impl StoreConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, StoreError> {
        let config: StoreConfig =
            toml::from_str(contents).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the store cannot work with
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.list_page_size == 0 {
            return Err(StoreError::Config("list_page_size must be at least 1".into()));
        }
        if self.comments_page_size == 0 {
            return Err(StoreError::Config("comments_page_size must be at least 1".into()));
        }
        if self.inference_tolerance_ms < 0 {
            return Err(StoreError::Config("inference_tolerance_ms must not be negative".into()));
        }
        let keys = [&self.votes_key, &self.comments_key, &self.error_log_key];
        if keys.iter().any(|k| k.is_empty()) {
            return Err(StoreError::Config("storage keys must not be empty".into()));
        }
        if self.votes_key == self.comments_key
            || self.votes_key == self.error_log_key
            || self.comments_key == self.error_log_key
        {
            return Err(StoreError::Config("storage keys must be distinct".into()));
        }
        Ok(())
    }

    /// Inference window as a duration
    pub fn inference_tolerance(&self) -> Duration {
        Duration::milliseconds(self.inference_tolerance_ms)
    }
}
