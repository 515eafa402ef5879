//! Mutation gateway - submitting votes and optional comments

use crate::error::StoreError;
use crate::store::NewsStore;
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use std::slice;
use tracing::{debug, warn};
use verity_domain::timestamp::now_millis;
use verity_domain::traits::SessionStore;
use verity_domain::{Comment, NewsId, Vote};

/// A vote as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    /// News item voted on
    pub news_id: NewsId,
    /// `true` for "fake"
    pub is_fake: bool,
    /// Optional comment text; blank means no comment
    pub text: Option<String>,
    /// Optional image link for the comment; blank means none
    pub image_url: Option<String>,
}

impl VoteRequest {
    /// A vote without a comment
    pub fn new(news_id: impl Into<NewsId>, is_fake: bool) -> Self {
        Self {
            news_id: news_id.into(),
            is_fake,
            text: None,
            image_url: None,
        }
    }

    /// Attach comment text
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach an image link
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Whether a submission reached storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Durability {
    /// Every new record was written
    Persisted,
    /// At least one record is held in memory only
    Unsaved(String),
}

/// Records created by [`NewsStore::submit_vote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The new vote
    pub vote: Vote,
    /// The new comment, if non-blank text was supplied
    pub comment: Option<Comment>,
    /// Whether the records were persisted
    pub durability: Durability,
}

/// Trim optional input; blank becomes `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl<S: KeyValueStorage> NewsStore<S> {
    /// Record a vote and, if text was supplied, a comment, stamped now
    pub fn submit_vote(&mut self, request: VoteRequest) -> Result<Submission, StoreError> {
        self.submit_vote_at(request, now_millis())
    }

    /// Record a vote and optional comment with an explicit timestamp
    ///
    /// The news item must exist; an unknown id fails with
    /// [`StoreError::UnknownNews`] and changes nothing. Otherwise the new
    /// records are appended to the in-memory groupings and then to storage.
    /// A storage failure does not undo the in-memory change: it is logged,
    /// recorded in the error log and reported through
    /// [`Submission::durability`].
    pub fn submit_vote_at(
        &mut self,
        request: VoteRequest,
        now: DateTime<Utc>,
    ) -> Result<Submission, StoreError> {
        if !self.contains_news(request.news_id.as_str()) {
            return Err(StoreError::UnknownNews(request.news_id));
        }

        let vote = Vote::new(request.news_id.clone(), request.is_fake, now);
        self.votes
            .entry(request.news_id.clone())
            .or_default()
            .push(vote.clone());

        let comment = non_blank(request.text.as_deref()).map(|text| {
            Comment::new(
                request.news_id.clone(),
                text,
                non_blank(request.image_url.as_deref()),
                now,
                Some(request.is_fake),
            )
        });
        if let Some(comment) = &comment {
            self.comments
                .entry(request.news_id.clone())
                .or_default()
                .push(comment.clone());
        }

        debug!(
            "Recorded vote {} on {} (fake: {}, comment: {})",
            vote.id,
            vote.news_id,
            vote.is_fake,
            comment.is_some()
        );

        let durability = self.persist_new(&vote, comment.as_ref());
        Ok(Submission {
            vote,
            comment,
            durability,
        })
    }

    /// Append exactly the new records to storage.
    ///
    /// Votes and comments are written independently, so a failed vote write
    /// does not keep the comment from being saved.
    fn persist_new(&mut self, vote: &Vote, comment: Option<&Comment>) -> Durability {
        let mut failures = Vec::new();

        if let Err(e) = self.persistence.append_votes(slice::from_ref(vote)) {
            warn!("Failed to persist vote {}: {}", vote.id, e);
            self.unsaved_votes.push(vote.clone());
            failures.push(format!("vote: {}", e));
        }

        if let Some(comment) = comment {
            if let Err(e) = self.persistence.append_comments(slice::from_ref(comment)) {
                warn!("Failed to persist comment {}: {}", comment.id, e);
                self.unsaved_comments.push(comment.clone());
                failures.push(format!("comment: {}", e));
            }
        }

        if failures.is_empty() {
            return Durability::Persisted;
        }

        let reason = failures.join("; ");
        self.track_error(reason.clone(), "submit vote");
        Durability::Unsaved(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, SeedRepository, StoreConfig};
    use chrono::TimeZone;
    use verity_domain::{NewsItem, VoteCounts};

    fn store() -> NewsStore<MemoryStorage> {
        let news = vec![NewsItem::new("n1", "Headline", Utc::now(), false)];
        NewsStore::open(MemoryStorage::new(), SeedRepository::new(news, vec![], vec![]), StoreConfig::default()).0
    }

    #[test]
    fn test_three_fake_one_genuine() {
        let mut store = store();
        for _ in 0..3 {
            store.submit_vote(VoteRequest::new("n1", true)).unwrap();
        }
        store.submit_vote(VoteRequest::new("n1", false)).unwrap();

        assert_eq!(store.vote_counts("n1"), VoteCounts::new(3, 1));
        assert!(store.computed_status("n1"));
    }

    #[test]
    fn test_whitespace_comment_is_not_created() {
        let mut store = store();
        let submission = store
            .submit_vote(VoteRequest::new("n1", true).with_comment("   "))
            .unwrap();
        assert!(submission.comment.is_none());
        assert!(store.comments_for("n1").is_empty());
        assert!(store.storage().get_item("afn.v1.comments").unwrap().is_none());
    }

    #[test]
    fn test_comment_is_trimmed_and_mirrors_vote() {
        let mut store = store();
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let request = VoteRequest::new("n1", false)
            .with_comment("  seen this before  ")
            .with_image_url("   ");
        let submission = store.submit_vote_at(request, now).unwrap();

        let comment = submission.comment.unwrap();
        assert_eq!(comment.text, "seen this before");
        assert_eq!(comment.image_url, None);
        assert_eq!(comment.is_fake, Some(false));
        assert_eq!(comment.created_at, now);
        assert_eq!(submission.vote.created_at, now);
        assert_eq!(store.comments_for("n1"), [comment]);
    }

    #[test]
    fn test_image_url_is_trimmed() {
        let mut store = store();
        let request = VoteRequest::new("n1", true)
            .with_comment("proof")
            .with_image_url(" https://img.example/x.png ");
        let comment = store.submit_vote(request).unwrap().comment.unwrap();
        assert_eq!(comment.image_url.as_deref(), Some("https://img.example/x.png"));
    }

    #[test]
    fn test_unknown_news_rejected_without_side_effects() {
        let mut store = store();
        let err = store
            .submit_vote(VoteRequest::new("ghost", true).with_comment("hi"))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownNews(ref id) if id.as_str() == "ghost"));
        assert!(store.votes_for("ghost").is_empty());
        assert!(store.storage().get_item("afn.v1.votes").unwrap().is_none());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let news = vec![NewsItem::new("n1", "Headline", Utc::now(), false)];
        let seeds = SeedRepository::new(news, vec![], vec![]);
        let mut store = NewsStore::open(MemoryStorage::with_quota(16), seeds, StoreConfig::default()).0;

        let submission = store
            .submit_vote(VoteRequest::new("n1", true).with_comment("too big to store"))
            .unwrap();
        assert!(matches!(submission.durability, Durability::Unsaved(_)));
        assert_eq!(store.vote_counts("n1"), VoteCounts::new(1, 0));
        assert_eq!(store.comments_for("n1").len(), 1);
        assert_eq!(store.error_log().count(), 1);
        assert_eq!(store.error_log().errors()[0].context, "submit vote");
    }
}
