//! Comments attached to votes

use crate::ids::{CommentId, NewsId};
use crate::timestamp::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a news item
///
/// Comments created at runtime always carry `is_fake`, mirrored from the
/// vote they were submitted with. Seed comments may lack it; see
/// [`crate::inference`] for how the flag is recovered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier
    pub id: CommentId,

    /// News item commented on
    pub news_id: NewsId,

    /// Free text body
    #[serde(default)]
    pub text: String,

    /// Optional image link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// When the comment was written
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,

    /// Truthfulness flag of the accompanying vote, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fake: Option<bool>,
}

impl Comment {
    /// Create a comment with a freshly generated id
    pub fn new(
        news_id: NewsId,
        text: String,
        image_url: Option<String>,
        created_at: DateTime<Utc>,
        is_fake: Option<bool>,
    ) -> Self {
        Self {
            id: CommentId::generate(),
            news_id,
            text,
            image_url,
            created_at,
            is_fake,
        }
    }
}
