//! News items - the immutable reports users vote on

use crate::ids::NewsId;
use crate::timestamp::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news item as loaded from seed data
///
/// News items are never mutated after load. `is_fake` is the seed default
/// status; it only decides the displayed status when the item has no votes
/// or its votes are tied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Unique identifier
    pub id: NewsId,

    /// Headline
    pub title: String,

    /// Short description shown on list cards
    #[serde(default, alias = "shortDetail")]
    pub summary: String,

    /// Who reported the item
    #[serde(default)]
    pub reporter: String,

    /// When the item was reported
    #[serde(with = "iso_millis")]
    pub reported_at: DateTime<Utc>,

    /// Optional cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Seed default status, used on zero votes or a tie
    #[serde(default)]
    pub is_fake: bool,
}

/// Extended content for a news item's detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    /// News item this detail belongs to
    pub news_id: NewsId,

    /// Full article text
    #[serde(default)]
    pub full_detail: String,

    /// Link to the original source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Full-size image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsItem {
    /// Create a news item with an empty summary and reporter
    pub fn new(
        id: impl Into<NewsId>,
        title: impl Into<String>,
        reported_at: DateTime<Utc>,
        is_fake: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            reporter: String::new(),
            reported_at,
            image_url: None,
            is_fake,
        }
    }
}
