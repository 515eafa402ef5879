//! Error types for the storage layer

use std::path::PathBuf;
use thiserror::Error;
use verity_domain::NewsId;

/// Errors raised by a [`crate::KeyValueStorage`] backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend cannot be used at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Write would exceed the backend's capacity
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {available} available")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Bytes the write required
        needed: usize,
        /// Bytes left under the quota
        available: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable errors reading or writing persisted session data
///
/// None of these are fatal: the store logs them and carries on with seed-only
/// or in-memory-only state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored value is not a JSON list of the expected records
    #[error("Corrupt value under '{key}': {source}")]
    Corrupt {
        /// Storage key holding the value
        key: String,
        /// Parse failure
        source: serde_json::Error,
    },

    /// New records could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(serde_json::Error),
}

/// Errors loading seed data
///
/// Seed data ships with the application, so these are fatal at startup.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Seed file is not valid JSON for its collection
    #[error("Failed to parse seed file {}: {source}", path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Parse failure
        source: serde_json::Error,
    },

    /// Two news items share an id
    #[error("Duplicate news id in seed data: {0}")]
    DuplicateNews(NewsId),

    /// A seed vote, comment or detail points at a missing news item
    #[error("Seed {record} references unknown news item {news_id}")]
    DanglingReference {
        /// Kind and id of the offending record
        record: String,
        /// The missing news id
        news_id: NewsId,
    },
}

/// Errors returned by [`crate::NewsStore`] operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Operation named a news item that does not exist
    #[error("News item not found: {0}")]
    UnknownNews(NewsId),

    /// Seed loading failed
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
