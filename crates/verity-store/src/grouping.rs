//! Merge engine - per-news groupings of votes and comments

use std::collections::{HashMap, HashSet};
use verity_domain::{Comment, NewsId, Vote};

/// News id → records in arrival order (seed records first)
pub type Grouping<T> = HashMap<NewsId, Vec<T>>;

/// A record owned by a news item
pub trait NewsRecord: Clone {
    /// Owning news item
    fn news_id(&self) -> &NewsId;
    /// The record's own identifier
    fn record_id(&self) -> &str;
}

impl NewsRecord for Vote {
    fn news_id(&self) -> &NewsId {
        &self.news_id
    }

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl NewsRecord for Comment {
    fn news_id(&self) -> &NewsId {
        &self.news_id
    }

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Partition records by owning news item, preserving input order
pub fn group_by_news_id<T: NewsRecord>(records: &[T]) -> Grouping<T> {
    let mut grouped: Grouping<T> = HashMap::new();
    for record in records {
        grouped
            .entry(record.news_id().clone())
            .or_default()
            .push(record.clone());
    }
    grouped
}

/// Append session records onto a copy of the seed grouping
///
/// Records are appended in the order given, creating groups as needed. A
/// record whose id is already present (a seed record, or an earlier session
/// record) is skipped, so a seed record is never duplicated and each session
/// record lands exactly once. Returns the merged grouping and how many
/// records were appended.
pub fn merge_session<T, I>(seed: &Grouping<T>, session: I) -> (Grouping<T>, usize)
where
    T: NewsRecord,
    I: IntoIterator<Item = T>,
{
    let mut merged = seed.clone();
    let mut seen: HashSet<String> = seed
        .values()
        .flatten()
        .map(|r| r.record_id().to_string())
        .collect();

    let mut appended = 0;
    for record in session {
        if !seen.insert(record.record_id().to_string()) {
            continue;
        }
        merged.entry(record.news_id().clone()).or_default().push(record);
        appended += 1;
    }
    (merged, appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use verity_domain::VoteId;

    fn vote(id: &str, news: &str) -> Vote {
        Vote {
            id: VoteId::from(id),
            news_id: NewsId::from(news),
            is_fake: false,
            created_at: Utc::now(),
        }
    }

    fn ids(group: Option<&Vec<Vote>>) -> Vec<&str> {
        group.map(|g| g.iter().map(|v| v.id.as_str()).collect()).unwrap_or_default()
    }

    #[test]
    fn test_group_preserves_order() {
        let grouped = group_by_news_id(&[vote("a", "n1"), vote("b", "n2"), vote("c", "n1")]);
        assert_eq!(ids(grouped.get("n1")), ["a", "c"]);
        assert_eq!(ids(grouped.get("n2")), ["b"]);
    }

    #[test]
    fn test_merge_appends_after_seed_and_creates_groups() {
        let seed = group_by_news_id(&[vote("a", "n1")]);
        let (merged, appended) = merge_session(&seed, vec![vote("s1", "n1"), vote("s2", "n3")]);
        assert_eq!(appended, 2);
        assert_eq!(ids(merged.get("n1")), ["a", "s1"]);
        assert_eq!(ids(merged.get("n3")), ["s2"]);
        // Seed grouping untouched
        assert_eq!(ids(seed.get("n1")), ["a"]);
    }

    #[test]
    fn test_merge_skips_known_ids() {
        let seed = group_by_news_id(&[vote("a", "n1")]);
        let session = vec![vote("a", "n1"), vote("s1", "n1"), vote("s1", "n1")];
        let (merged, appended) = merge_session(&seed, session);
        assert_eq!(appended, 1);
        assert_eq!(ids(merged.get("n1")), ["a", "s1"]);
    }
}
