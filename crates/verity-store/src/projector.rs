//! View projector - filtered, paginated news list and comment pages

use crate::store::NewsStore;
use crate::storage::KeyValueStorage;
use verity_domain::{infer_comment_flags, page_slice, Comment, ListFilter, NewsId, NewsItem, PageInfo};

impl<S: KeyValueStorage> NewsStore<S> {
    /// Change the list filter and go back to page 1
    pub fn set_filter(&mut self, filter: ListFilter) {
        self.view.set_filter(filter);
    }

    /// Move the list to `page` (clamped to at least 1)
    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    /// Change the list page size (clamped to at least 1) and go back to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.view.set_page_size(size);
    }

    /// Remember the comments page for a news item (clamped to at least 1)
    pub fn set_detail_comments_page(&mut self, news_id: impl Into<NewsId>, page: usize) {
        self.view.set_comments_page(news_id.into(), page);
    }

    /// News items passing the active filter, newest first
    pub fn filtered_news(&self) -> Vec<&NewsItem> {
        let filter = self.view.filter();
        self.news
            .iter()
            .filter(|item| filter.matches(self.computed_status(item.id.as_str())))
            .collect()
    }

    /// The current page of [`filtered_news`](Self::filtered_news)
    pub fn paged_news(&self) -> Vec<&NewsItem> {
        let filtered = self.filtered_news();
        page_slice(&filtered, self.view.page(), self.view.page_size()).to_vec()
    }

    /// Position summary for the current list page
    pub fn list_page_info(&self) -> PageInfo {
        PageInfo::new(self.view.page(), self.view.page_size(), self.filtered_news().len())
    }

    /// One page of a news item's comments, with missing flags inferred
    ///
    /// Uses `page` when given, else the page remembered for the item, else 1.
    /// Inference runs over the whole comment group before paginating and
    /// never alters the stored comments, so repeated calls return the same
    /// result.
    pub fn comments_page(&self, news_id: &str, page: Option<usize>) -> Vec<Comment> {
        let inferred = infer_comment_flags(
            self.comments_for(news_id),
            self.votes_for(news_id),
            self.config.inference_tolerance(),
        );
        let page = self.resolve_comments_page(news_id, page);
        page_slice(&inferred, page, self.view.comments_page_size()).to_vec()
    }

    /// Position summary for a news item's comments page
    pub fn comments_page_info(&self, news_id: &str, page: Option<usize>) -> PageInfo {
        PageInfo::new(
            self.resolve_comments_page(news_id, page),
            self.view.comments_page_size(),
            self.comments_for(news_id).len(),
        )
    }

    fn resolve_comments_page(&self, news_id: &str, page: Option<usize>) -> usize {
        page.unwrap_or_else(|| self.view.comments_page(news_id)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use crate::{MemoryStorage, NewsStore, SeedRepository, StoreConfig};
    use chrono::{Duration, TimeZone, Utc};
    use verity_domain::{Comment, CommentId, ListFilter, NewsId, NewsItem, Vote, VoteId};

    fn news(n: usize) -> Vec<NewsItem> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // Newest first after sorting: n0 is the newest
        (0..n)
            .map(|i| NewsItem::new(format!("n{}", i), format!("News {}", i), base - Duration::hours(i as i64), i % 2 == 0))
            .collect()
    }

    fn store_with(n: usize) -> NewsStore<MemoryStorage> {
        NewsStore::open(MemoryStorage::new(), SeedRepository::new(news(n), vec![], vec![]), StoreConfig::default()).0
    }

    fn ids(items: &[&NewsItem]) -> Vec<String> {
        items.iter().map(|n| n.id.to_string()).collect()
    }

    #[test]
    fn test_pagination_law() {
        let mut store = store_with(23);
        store.set_page_size(5);
        store.set_page(3);
        let filtered = store.filtered_news();
        assert_eq!(ids(&store.paged_news()), ids(&filtered[10..15]));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut store = store_with(12);
        store.set_page_size(5);
        store.set_page(4);
        assert!(store.paged_news().is_empty());
    }

    #[test]
    fn test_filter_reset_law() {
        let mut store = store_with(30);
        store.set_page(4);
        store.set_filter(ListFilter::Fake);
        assert_eq!(store.view().page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut store = store_with(30);
        store.set_page(2);
        store.set_page_size(20);
        assert_eq!(store.view().page(), 1);
    }

    #[test]
    fn test_filter_by_computed_status() {
        let mut store = store_with(6);
        store.set_filter(ListFilter::Fake);
        assert_eq!(ids(&store.filtered_news()), ["n0", "n2", "n4"]);
        store.set_filter(ListFilter::NonFake);
        assert_eq!(ids(&store.filtered_news()), ["n1", "n3", "n5"]);
        store.set_filter(ListFilter::All);
        assert_eq!(store.filtered_news().len(), 6);
    }

    #[test]
    fn test_list_page_info() {
        let mut store = store_with(12);
        store.set_page_size(5);
        store.set_page(3);
        let info = store.list_page_info();
        assert_eq!((info.first_item, info.last_item, info.total_items), (11, 12, 12));
        assert_eq!(info.total_pages, 3);
    }

    fn comment(i: usize, at: chrono::DateTime<Utc>) -> Comment {
        Comment {
            id: CommentId::new(format!("c{}", i)),
            news_id: NewsId::from("n0"),
            text: format!("comment {}", i),
            image_url: None,
            created_at: at,
            is_fake: None,
        }
    }

    #[test]
    fn test_comments_page_uses_remembered_page() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let comments = (0..7).map(|i| comment(i, at + Duration::minutes(i as i64))).collect();
        let seeds = SeedRepository::new(news(1), vec![], comments);
        let mut store = NewsStore::open(MemoryStorage::new(), seeds, StoreConfig::default()).0;

        assert_eq!(store.comments_page("n0", None).len(), 5);
        store.set_detail_comments_page("n0", 2);
        let second = store.comments_page("n0", None);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].id.as_str(), "c5");
        // Explicit page wins over the remembered one
        assert_eq!(store.comments_page("n0", Some(1))[0].id.as_str(), "c0");

        let info = store.comments_page_info("n0", None);
        assert_eq!((info.page, info.total_pages), (2, 2));
    }

    #[test]
    fn test_comments_page_infers_flags_without_mutating() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let near = Vote {
            id: VoteId::from("v1"),
            news_id: NewsId::from("n0"),
            is_fake: true,
            created_at: at + Duration::milliseconds(1500),
        };
        let seeds = SeedRepository::new(news(1), vec![near], vec![comment(0, at)]);
        let store = NewsStore::open(MemoryStorage::new(), seeds, StoreConfig::default()).0;

        assert_eq!(store.comments_page("n0", None)[0].is_fake, Some(true));
        assert_eq!(store.comments_for("n0")[0].is_fake, None);
        // Repeatable
        assert_eq!(store.comments_page("n0", None), store.comments_page("n0", None));
    }

    #[test]
    fn test_comments_page_for_item_without_comments() {
        let store = store_with(1);
        assert!(store.comments_page("n0", None).is_empty());
        assert!(store.comments_page("missing", Some(3)).is_empty());
    }
}
