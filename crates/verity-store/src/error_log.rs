//! Bounded log of recoverable errors
//!
//! Storage failures never interrupt the session, so they are collected here
//! (and mirrored to storage by the store) for later inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verity_domain::timestamp::iso_millis;

/// One recorded error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error message
    pub message: String,
    /// Operation that failed, e.g. `hydrate votes`
    pub context: String,
    /// When the error was recorded
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Error log keeping the most recent `capacity` entries, oldest first
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
    capacity: usize,
}

impl ErrorLog {
    /// Create an empty log
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Record an error, evicting the oldest entries beyond capacity
    pub fn track(&mut self, message: impl Into<String>, context: impl Into<String>, at: DateTime<Utc>) {
        self.entries.push(ErrorEntry {
            message: message.into(),
            context: context.into(),
            timestamp: at,
        });
        self.evict();
    }

    /// Replace the contents, e.g. with entries restored from storage
    pub fn replace(&mut self, entries: Vec<ErrorEntry>) {
        self.entries = entries;
        self.evict();
    }

    fn evict(&mut self) {
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }

    /// Every retained entry, oldest first
    pub fn errors(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// The last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> &[ErrorEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// Number of retained entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no errors are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
