//! The news store: seed data reconciled with persisted session activity
//!
//! `NewsStore` is an explicit state object, constructed once by the
//! application and passed to whatever renders it. It owns the storage
//! backend, the merged vote and comment groupings, the view state and the
//! error log.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::error_log::ErrorLog;
use crate::grouping::{group_by_news_id, merge_session, Grouping};
use crate::persistence::{CollectionLoad, SessionPersistence, StorageKeys};
use crate::seeds::SeedRepository;
use crate::storage::KeyValueStorage;
use crate::view::ViewState;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use verity_domain::timestamp::now_millis;
use verity_domain::traits::SessionStore;
use verity_domain::{Comment, NewsDetail, NewsId, NewsItem, Vote, VoteCounts};

/// What [`NewsStore::hydrate`] restored from storage
#[derive(Debug)]
pub struct HydrationReport {
    /// Session votes
    pub votes: CollectionLoad,
    /// Session comments
    pub comments: CollectionLoad,
}

impl HydrationReport {
    /// Whether either collection fell back to seed data
    pub fn is_degraded(&self) -> bool {
        self.votes.is_degraded() || self.comments.is_degraded()
    }
}

/// Client-side state store for news items, votes and comments
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use verity_domain::NewsItem;
/// use verity_store::{MemoryStorage, NewsStore, SeedRepository, StoreConfig, VoteRequest};
///
/// let seeds = SeedRepository::new(
///     vec![NewsItem::new("n1", "Headline", Utc::now(), false)],
///     Vec::new(),
///     Vec::new(),
/// );
/// let (mut store, _report) = NewsStore::open(MemoryStorage::new(), seeds, StoreConfig::default());
///
/// store.submit_vote(VoteRequest::new("n1", true)).unwrap();
/// assert!(store.computed_status("n1"));
/// ```
pub struct NewsStore<S: KeyValueStorage> {
    pub(crate) config: StoreConfig,
    pub(crate) persistence: SessionPersistence<S>,
    pub(crate) news: Vec<NewsItem>,
    pub(crate) news_index: HashMap<NewsId, usize>,
    pub(crate) details: HashMap<NewsId, NewsDetail>,
    pub(crate) seed_votes: Grouping<Vote>,
    pub(crate) seed_comments: Grouping<Comment>,
    pub(crate) votes: Grouping<Vote>,
    pub(crate) comments: Grouping<Comment>,
    /// Records created this session that could not be persisted
    pub(crate) unsaved_votes: Vec<Vote>,
    pub(crate) unsaved_comments: Vec<Comment>,
    pub(crate) view: ViewState,
    pub(crate) error_log: ErrorLog,
    pub(crate) hydrated: bool,
}

impl<S: KeyValueStorage> NewsStore<S> {
    /// Create an empty store over `storage`
    ///
    /// Call [`load_seeds`](Self::load_seeds) and then
    /// [`hydrate`](Self::hydrate) before serving views.
    pub fn new(storage: S, config: StoreConfig) -> Self {
        let keys = StorageKeys::from(&config);
        let view = ViewState::new(config.list_page_size, config.comments_page_size);
        let error_log = ErrorLog::new(config.error_log_capacity);

        Self {
            persistence: SessionPersistence::new(storage, keys),
            news: Vec::new(),
            news_index: HashMap::new(),
            details: HashMap::new(),
            seed_votes: HashMap::new(),
            seed_comments: HashMap::new(),
            votes: HashMap::new(),
            comments: HashMap::new(),
            unsaved_votes: Vec::new(),
            unsaved_comments: Vec::new(),
            view,
            error_log,
            hydrated: false,
            config,
        }
    }

    /// Create a store, load `seeds` and hydrate from storage in one step
    pub fn open(storage: S, seeds: SeedRepository, config: StoreConfig) -> (Self, HydrationReport) {
        let mut store = Self::new(storage, config);
        store.load_seeds(seeds);
        let report = store.hydrate();
        (store, report)
    }

    /// Load the seed collections
    ///
    /// News items are ordered newest first by report time (ties keep file
    /// order) and every item starts on comments page 1. Groupings are reset
    /// to the seed records plus any records this session failed to persist.
    pub fn load_seeds(&mut self, seeds: SeedRepository) {
        let SeedRepository {
            mut news,
            votes,
            comments,
            details,
        } = seeds;

        news.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        self.news_index = news
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        for item in &news {
            self.view.init_comments_page(&item.id);
        }
        self.news = news;
        self.details = details.into_iter().map(|d| (d.news_id.clone(), d)).collect();

        self.seed_votes = group_by_news_id(&votes);
        self.seed_comments = group_by_news_id(&comments);
        self.rebuild(Vec::new(), Vec::new());

        info!(
            "Loaded {} news items, {} seed votes, {} seed comments",
            self.news.len(),
            votes.len(),
            comments.len()
        );
    }

    /// Merge persisted session votes and comments over the seed groupings
    ///
    /// Groupings are rebuilt from the seeds on every call, so hydrating twice
    /// without new writes in between yields the same groupings. A collection
    /// that cannot be read falls back to its seed records; the failure is
    /// logged and reported, never raised. The stored error log is restored
    /// on the first hydrate only.
    pub fn hydrate(&mut self) -> HydrationReport {
        // Later hydrates keep the in-memory log, which may hold entries the
        // stored copy missed
        if !self.hydrated {
            self.restore_error_log();
        }

        let (votes_load, stored_votes) = match self.persistence.read_votes() {
            Ok(votes) if votes.is_empty() => (CollectionLoad::Empty, votes),
            Ok(votes) => (CollectionLoad::Restored(votes.len()), votes),
            Err(e) => {
                warn!("Failed to hydrate votes, using seed votes only: {}", e);
                self.track_error(e.to_string(), "hydrate votes");
                (CollectionLoad::Degraded(e), Vec::new())
            }
        };

        let (comments_load, stored_comments) = match self.persistence.read_comments() {
            Ok(comments) if comments.is_empty() => (CollectionLoad::Empty, comments),
            Ok(comments) => (CollectionLoad::Restored(comments.len()), comments),
            Err(e) => {
                warn!("Failed to hydrate comments, using seed comments only: {}", e);
                self.track_error(e.to_string(), "hydrate comments");
                (CollectionLoad::Degraded(e), Vec::new())
            }
        };

        self.rebuild(stored_votes, stored_comments);
        self.hydrated = true;

        HydrationReport {
            votes: votes_load,
            comments: comments_load,
        }
    }

    /// Rebuild groupings as seed, then `stored`, then unsaved session records.
    fn rebuild(&mut self, stored_votes: Vec<Vote>, stored_comments: Vec<Comment>) {
        let session_votes = stored_votes.into_iter().chain(self.unsaved_votes.iter().cloned());
        let (votes, appended_votes) = merge_session(&self.seed_votes, session_votes);

        let session_comments = stored_comments
            .into_iter()
            .chain(self.unsaved_comments.iter().cloned());
        let (comments, appended_comments) = merge_session(&self.seed_comments, session_comments);

        debug!(
            "Merged {} session votes and {} session comments over seeds",
            appended_votes, appended_comments
        );
        self.votes = votes;
        self.comments = comments;
    }

    /// Whether [`hydrate`](Self::hydrate) has run
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Borrow the storage backend
    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Consume the store, returning its storage backend
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    /// Every news item, newest first
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Look up a news item
    pub fn news_item(&self, news_id: &str) -> Option<&NewsItem> {
        self.news_index.get(news_id).map(|&idx| &self.news[idx])
    }

    /// Whether a news item exists
    pub fn contains_news(&self, news_id: &str) -> bool {
        self.news_index.contains_key(news_id)
    }

    /// Existence check for per-item routes
    pub fn guard_news(&self, news_id: &str) -> Result<&NewsItem, StoreError> {
        self.news_item(news_id)
            .ok_or_else(|| StoreError::UnknownNews(NewsId::from(news_id)))
    }

    /// Detail page content for a news item, if any was seeded
    pub fn news_detail(&self, news_id: &str) -> Option<&NewsDetail> {
        self.details.get(news_id)
    }

    /// Votes on a news item, in arrival order
    pub fn votes_for(&self, news_id: &str) -> &[Vote] {
        self.votes.get(news_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stored comments on a news item, in arrival order, without inference
    pub fn comments_for(&self, news_id: &str) -> &[Comment] {
        self.comments.get(news_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fake / non-fake tally for a news item
    pub fn vote_counts(&self, news_id: &str) -> VoteCounts {
        VoteCounts::tally(self.votes_for(news_id))
    }

    /// Current "is fake" status of a news item
    ///
    /// The majority of votes decides; with no votes or a tie the item's seed
    /// default applies. An unknown news item reports `false`. Computed from
    /// the current votes on every call.
    pub fn computed_status(&self, news_id: &str) -> bool {
        let seed_default = self.news_item(news_id).map(|n| n.is_fake).unwrap_or(false);
        self.vote_counts(news_id).resolve(seed_default)
    }

    /// Recoverable errors recorded so far
    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Empty the error log and remove its stored copy
    pub fn clear_error_log(&mut self) {
        self.error_log.clear();
        if let Err(e) = self.persistence.clear_error_log() {
            warn!("Failed to remove stored error log: {}", e);
        }
    }

    /// Record a recoverable error and mirror the log to storage.
    ///
    /// A failure to mirror is only traced; recording it would recurse.
    pub(crate) fn track_error(&mut self, message: String, context: &str) {
        self.error_log.track(message, context, now_millis());
        if let Err(e) = self.persistence.write_error_log(self.error_log.errors()) {
            warn!("Failed to persist error log: {}", e);
        }
    }

    fn restore_error_log(&mut self) {
        match self.persistence.read_error_log() {
            Ok(entries) => self.error_log.replace(entries),
            Err(e) => warn!("Discarding unreadable error log: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};
    use verity_domain::VoteId;

    fn item(id: &str, day: u32, is_fake: bool) -> NewsItem {
        NewsItem::new(id, format!("News {}", id), Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(), is_fake)
    }

    fn seed_vote(id: &str, news: &str, is_fake: bool) -> Vote {
        Vote {
            id: VoteId::from(id),
            news_id: NewsId::from(news),
            is_fake,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(1),
        }
    }

    fn store(seeds: SeedRepository) -> NewsStore<MemoryStorage> {
        NewsStore::open(MemoryStorage::new(), seeds, StoreConfig::default()).0
    }

    #[test]
    fn test_news_sorted_newest_first() {
        let seeds = SeedRepository::new(vec![item("old", 1, false), item("new", 9, false), item("mid", 5, false)], vec![], vec![]);
        let store = store(seeds);
        let order: Vec<&str> = store.news().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old"]);
        assert_eq!(store.news_item("mid").map(|n| n.title.as_str()), Some("News mid"));
    }

    #[test]
    fn test_zero_votes_reports_seed_default() {
        let store = store(SeedRepository::new(vec![item("n1", 1, false), item("n2", 2, true)], vec![], vec![]));
        assert!(!store.computed_status("n1"));
        assert!(store.computed_status("n2"));
    }

    #[test]
    fn test_seed_votes_decide_status() {
        let votes = vec![
            seed_vote("v1", "n1", true),
            seed_vote("v2", "n1", true),
            seed_vote("v3", "n1", false),
        ];
        let store = store(SeedRepository::new(vec![item("n1", 1, false)], votes, vec![]));
        assert_eq!(store.vote_counts("n1"), VoteCounts::new(2, 1));
        assert!(store.computed_status("n1"));
    }

    #[test]
    fn test_unknown_news_status_is_false() {
        let store = store(SeedRepository::default());
        assert!(!store.computed_status("ghost"));
        assert_eq!(store.vote_counts("ghost"), VoteCounts::default());
        assert!(matches!(store.guard_news("ghost"), Err(StoreError::UnknownNews(_))));
    }

    #[test]
    fn test_hydrated_flag() {
        let mut store = NewsStore::new(MemoryStorage::new(), StoreConfig::default());
        store.load_seeds(SeedRepository::default());
        assert!(!store.is_hydrated());
        store.hydrate();
        assert!(store.is_hydrated());
    }

    #[test]
    fn test_hydrated_flag_set_even_when_degraded() {
        let (store, report) = NewsStore::open(MemoryStorage::unavailable(), SeedRepository::default(), StoreConfig::default());
        assert!(report.is_degraded());
        assert!(store.is_hydrated());
    }
}
