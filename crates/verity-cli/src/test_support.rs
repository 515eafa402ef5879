//! Shared fixtures for command tests.

use chrono::Duration;
use verity_domain::timestamp::now_millis;
use verity_domain::{Comment, CommentId, NewsDetail, NewsId, NewsItem, Vote, VoteId};
use verity_store::{MemoryStorage, NewsStore, SeedRepository, StoreConfig};

/// Two news items: `n1` (genuine, older) and `n2` (fake, newer, one vote and
/// one flagless comment half a second after it).
pub fn sample_seeds() -> SeedRepository {
    let now = now_millis();
    let older = now - Duration::minutes(60);

    let news = vec![
        NewsItem::new("n1", "City opens new library", older, false),
        NewsItem::new("n2", "Moon made of cheese", now, true),
    ];
    let votes = vec![Vote {
        id: VoteId::from("seed-v1"),
        news_id: NewsId::from("n2"),
        is_fake: true,
        created_at: now,
    }];
    let comments = vec![Comment {
        id: CommentId::from("seed-c1"),
        news_id: NewsId::from("n2"),
        text: "Obviously staged".to_string(),
        image_url: None,
        created_at: now + Duration::milliseconds(500),
        is_fake: None,
    }];
    let details = vec![NewsDetail {
        news_id: NewsId::from("n2"),
        full_detail: "Full story of n2".to_string(),
        source: None,
        image_url: None,
    }];

    SeedRepository::new(news, votes, comments).with_details(details)
}

/// A hydrated in-memory store over [`sample_seeds`].
pub fn sample_store() -> NewsStore<MemoryStorage> {
    NewsStore::open(MemoryStorage::new(), sample_seeds(), StoreConfig::default()).0
}
