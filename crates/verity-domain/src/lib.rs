//! Verity Domain Layer
//!
//! This crate contains the core model and the pure computations of Verity,
//! a news-truthfulness voting system. It defines the records users create,
//! the rules that turn vote tallies into a truthfulness status, and the
//! pagination math the views are built on.
//!
//! ## Key Concepts
//!
//! - **News Item**: an immutable report carrying a seed "is fake" default
//! - **Vote**: an append-only fake / non-fake judgement on one news item
//! - **Comment**: optional free text (and image URL) submitted with a vote
//! - **Status**: the majority side of the votes, or the seed default on a tie
//! - **Inference**: backfilling a comment's missing flag from a nearby vote
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Storage implementations live in `verity-store`
//! - Trait definitions for the persistence boundary live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comment;
pub mod filter;
pub mod ids;
pub mod inference;
pub mod news;
pub mod paging;
pub mod tally;
pub mod timestamp;
pub mod traits;
pub mod vote;

// Re-exports for convenience
pub use comment::Comment;
pub use filter::{ListFilter, ParseFilterError};
pub use ids::{CommentId, NewsId, VoteId};
pub use inference::{infer_comment_flags, infer_flag, DEFAULT_INFERENCE_TOLERANCE_MS};
pub use news::{NewsDetail, NewsItem};
pub use paging::{page_slice, page_window, PageInfo, PageMarker};
pub use tally::VoteCounts;
pub use vote::Vote;
