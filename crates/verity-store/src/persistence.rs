//! Persistence adapter for session votes, comments and the error log
//!
//! Each collection is one JSON array under its own key. Appends read the
//! existing array and write it back with the new records after it. Existing
//! entries keep their order and any fields this version does not model;
//! object keys may be re-serialized in a different order.

use crate::config::StoreConfig;
use crate::error::PersistenceError;
use crate::error_log::ErrorEntry;
use crate::storage::KeyValueStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use verity_domain::traits::SessionStore;
use verity_domain::{Comment, Vote};

/// Storage keys used by [`SessionPersistence`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Session votes
    pub votes: String,
    /// Session comments
    pub comments: String,
    /// Error log
    pub error_log: String,
}

impl From<&StoreConfig> for StorageKeys {
    fn from(config: &StoreConfig) -> Self {
        Self {
            votes: config.votes_key.clone(),
            comments: config.comments_key.clone(),
            error_log: config.error_log_key.clone(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

/// Outcome of restoring one persisted collection
///
/// Distinguishes "nothing stored" from "stored but unreadable" so callers
/// can observe degraded mode instead of it being silently swallowed.
#[derive(Debug)]
pub enum CollectionLoad {
    /// Records were restored
    Restored(usize),
    /// Nothing was stored
    Empty,
    /// The stored value could not be read; seed data only
    Degraded(PersistenceError),
}

impl CollectionLoad {
    /// Whether the collection fell back to seed data because of an error
    pub fn is_degraded(&self) -> bool {
        matches!(self, CollectionLoad::Degraded(_))
    }

    /// Number of restored records
    pub fn restored(&self) -> usize {
        match self {
            CollectionLoad::Restored(n) => *n,
            _ => 0,
        }
    }
}

/// JSON-over-key-value implementation of [`SessionStore`]
#[derive(Debug)]
pub struct SessionPersistence<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S: KeyValueStorage> SessionPersistence<S> {
    /// Wrap a storage backend
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// Storage keys in use
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Borrow the backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the backend
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give the backend back
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted error log
    pub fn read_error_log(&self) -> Result<Vec<ErrorEntry>, PersistenceError> {
        read_list(&self.storage, &self.keys.error_log)
    }

    /// Overwrite the persisted error log
    ///
    /// The log is bounded and evicts old entries, so unlike the session
    /// collections it is rewritten rather than appended to.
    pub fn write_error_log(&mut self, entries: &[ErrorEntry]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(entries).map_err(PersistenceError::Serialize)?;
        self.storage.set_item(&self.keys.error_log, &raw)?;
        Ok(())
    }

    /// Remove the persisted error log
    pub fn clear_error_log(&mut self) -> Result<(), PersistenceError> {
        self.storage.remove_item(&self.keys.error_log)?;
        Ok(())
    }
}

/// Read a JSON list; an absent key, blank value or `null` reads as empty.
fn read_list<S, T>(storage: &S, key: &str) -> Result<Vec<T>, PersistenceError>
where
    S: KeyValueStorage,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Option<Vec<T>>>(&raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| PersistenceError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Write `existing ++ new` under `key`.
///
/// The existing list must parse as `T`, exactly as [`read_list`] would read
/// it back; otherwise it is reported as corrupt and left in place rather than
/// overwritten. Records are carried as raw JSON so unmodelled fields survive.
fn append_list<S, T>(storage: &mut S, key: &str, new: &[T]) -> Result<(), PersistenceError>
where
    S: KeyValueStorage,
    T: Serialize + DeserializeOwned,
{
    if new.is_empty() {
        return Ok(());
    }

    let mut combined: Vec<Value> = read_list(storage, key)?;
    for value in &combined {
        serde_json::from_value::<T>(value.clone())
            .map_err(|source| PersistenceError::Corrupt {
                key: key.to_string(),
                source,
            })?;
    }
    for record in new {
        combined.push(serde_json::to_value(record).map_err(PersistenceError::Serialize)?);
    }

    let raw = serde_json::to_string(&combined).map_err(PersistenceError::Serialize)?;
    storage.set_item(key, &raw)?;
    Ok(())
}

impl<S: KeyValueStorage> SessionStore for SessionPersistence<S> {
    type Error = PersistenceError;

    fn read_votes(&self) -> Result<Vec<Vote>, Self::Error> {
        read_list(&self.storage, &self.keys.votes)
    }

    fn read_comments(&self) -> Result<Vec<Comment>, Self::Error> {
        read_list(&self.storage, &self.keys.comments)
    }

    fn append_votes(&mut self, votes: &[Vote]) -> Result<(), Self::Error> {
        append_list(&mut self.storage, &self.keys.votes, votes)
    }

    fn append_comments(&mut self, comments: &[Comment]) -> Result<(), Self::Error> {
        append_list(&mut self.storage, &self.keys.comments, comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use verity_domain::{NewsId, VoteId};

    fn persistence() -> SessionPersistence<MemoryStorage> {
        SessionPersistence::new(MemoryStorage::new(), StorageKeys::default())
    }

    fn vote(id: &str) -> Vote {
        Vote {
            id: VoteId::from(id),
            news_id: NewsId::from("n1"),
            is_fake: true,
            created_at: Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_read_missing_is_empty() {
        let p = persistence();
        assert!(p.read_votes().unwrap().is_empty());
        assert!(p.read_comments().unwrap().is_empty());
    }

    #[test]
    fn test_read_null_is_empty() {
        let mut p = persistence();
        p.storage_mut().set_item("afn.v1.votes", "null").unwrap();
        assert!(p.read_votes().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut p = persistence();
        p.append_votes(&[vote("a")]).unwrap();
        p.append_votes(&[vote("b"), vote("c")]).unwrap();

        let ids: Vec<String> = p.read_votes().unwrap().into_iter().map(|v| v.id.to_string()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_append_empty_writes_nothing() {
        let mut p = persistence();
        p.append_comments(&[]).unwrap();
        assert!(p.storage().get_item("afn.v1.comments").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let mut p = persistence();
        p.storage_mut().set_item("afn.v1.votes", "{not json").unwrap();
        let err = p.read_votes().unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { ref key, .. } if key == "afn.v1.votes"));
    }

    #[test]
    fn test_append_refuses_to_overwrite_corrupt_value() {
        let mut p = persistence();
        p.storage_mut().set_item("afn.v1.votes", "{not json").unwrap();
        assert!(p.append_votes(&[vote("a")]).is_err());
        assert_eq!(
            p.storage().get_item("afn.v1.votes").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_append_refuses_wrong_shape_list() {
        let mut p = persistence();
        p.storage_mut().set_item("afn.v1.votes", r#"[{"legacy":true}]"#).unwrap();

        let err = p.append_votes(&[vote("a")]).unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { ref key, .. } if key == "afn.v1.votes"));
        assert_eq!(
            p.storage().get_item("afn.v1.votes").unwrap().as_deref(),
            Some(r#"[{"legacy":true}]"#)
        );
    }

    #[test]
    fn test_append_keeps_unknown_fields() {
        let mut p = persistence();
        let legacy = r#"[{"id":"old","newsId":"n1","isFake":false,"createdAt":"2024-01-01T00:00:00.000Z","device":"phone"}]"#;
        p.storage_mut().set_item("afn.v1.votes", legacy).unwrap();
        p.append_votes(&[vote("new")]).unwrap();

        let raw = p.storage().get_item("afn.v1.votes").unwrap().unwrap();
        assert!(raw.contains("\"device\":\"phone\""));
        assert_eq!(p.read_votes().unwrap().len(), 2);
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let mut p = SessionPersistence::new(MemoryStorage::unavailable(), StorageKeys::default());
        assert!(matches!(p.append_votes(&[vote("a")]), Err(PersistenceError::Storage(_))));
    }

    #[test]
    fn test_error_log_round_trip() {
        let mut p = persistence();
        let entries = vec![ErrorEntry {
            message: "quota".into(),
            context: "submit vote".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap(),
        }];
        p.write_error_log(&entries).unwrap();
        assert_eq!(p.read_error_log().unwrap(), entries);

        p.clear_error_log().unwrap();
        assert!(p.read_error_log().unwrap().is_empty());
    }
}
