//! Verity Storage Layer
//!
//! Reconciles static seed data with session activity persisted in a
//! key-value store, and serves the filtered, paginated views a client renders.
//!
//! # Architecture
//!
//! - [`KeyValueStorage`] backends: [`MemoryStorage`], [`FileStorage`]
//! - [`SessionPersistence`]: append-only JSON lists of session votes and
//!   comments, implementing [`verity_domain::traits::SessionStore`]
//! - [`NewsStore`]: the state object (merge engine, status resolver, view
//!   projector and mutation gateway)
//!
//! Storage problems are recoverable: they are logged with `tracing`, kept in
//! the store's [`ErrorLog`] and never abort a session.
//!
//! # Examples
//!
//! ```
//! use verity_store::{MemoryStorage, NewsStore, SeedRepository, StoreConfig};
//!
//! let (store, report) = NewsStore::open(
//!     MemoryStorage::new(),
//!     SeedRepository::default(),
//!     StoreConfig::default(),
//! );
//! assert!(!report.is_degraded());
//! assert!(store.paged_news().is_empty());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod error_log;
pub mod gateway;
pub mod grouping;
pub mod persistence;
pub mod projector;
pub mod seeds;
pub mod storage;
pub mod store;
pub mod view;

pub use config::StoreConfig;
pub use error::{PersistenceError, SeedError, StorageError, StoreError};
pub use error_log::{ErrorEntry, ErrorLog};
pub use gateway::{Durability, Submission, VoteRequest};
pub use persistence::{CollectionLoad, SessionPersistence, StorageKeys};
pub use seeds::SeedRepository;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{HydrationReport, NewsStore};
pub use view::ViewState;
