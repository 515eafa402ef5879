//! Votes - append-only fake / non-fake judgements

use crate::ids::{NewsId, VoteId};
use crate::timestamp::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single vote on a news item
///
/// Votes are never updated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Unique identifier
    pub id: VoteId,

    /// News item voted on
    pub news_id: NewsId,

    /// `true` when the voter judged the item fake
    pub is_fake: bool,

    /// When the vote was cast
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a vote with a freshly generated id
    pub fn new(news_id: NewsId, is_fake: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id: VoteId::generate(),
            news_id,
            is_fake,
            created_at,
        }
    }
}
