//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and storage.
//! Implementations live in `verity-store`.

use crate::{Comment, Vote};

/// Durable log of the votes and comments created during user sessions
///
/// Both collections are append-only: implementations keep existing entries
/// in order and add new ones after them, never rewriting or de-duplicating.
///
/// Implemented by the infrastructure layer (verity-store)
pub trait SessionStore {
    /// Error type for store operations
    type Error;

    /// Read every persisted session vote, oldest first
    ///
    /// A store that has never been written to returns an empty list.
    fn read_votes(&self) -> Result<Vec<Vote>, Self::Error>;

    /// Read every persisted session comment, oldest first
    fn read_comments(&self) -> Result<Vec<Comment>, Self::Error>;

    /// Append votes after the ones already persisted
    fn append_votes(&mut self, votes: &[Vote]) -> Result<(), Self::Error>;

    /// Append comments after the ones already persisted
    fn append_comments(&mut self, comments: &[Comment]) -> Result<(), Self::Error>;
}
