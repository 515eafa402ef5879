//! View state: filter, list position and per-item comment pages

use std::collections::HashMap;
use verity_domain::{ListFilter, NewsId};

/// Transient, UI-owned position in the news list and comment pages
///
/// Pages are 1-indexed and every setter clamps to at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    filter: ListFilter,
    page: usize,
    page_size: usize,
    comment_pages: HashMap<NewsId, usize>,
    comments_page_size: usize,
}

impl ViewState {
    /// Start on page 1 of the unfiltered list
    pub fn new(page_size: usize, comments_page_size: usize) -> Self {
        Self {
            filter: ListFilter::All,
            page: 1,
            page_size: page_size.max(1),
            comment_pages: HashMap::new(),
            comments_page_size: comments_page_size.max(1),
        }
    }

    /// Active filter
    pub fn filter(&self) -> ListFilter {
        self.filter
    }

    /// Current list page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current list page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fixed comments page size
    pub fn comments_page_size(&self) -> usize {
        self.comments_page_size
    }

    /// Change the filter; the list position no longer applies, so page
    /// resets to 1
    pub fn set_filter(&mut self, filter: ListFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Move to `page`, clamped to at least 1
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change the page size (at least 1) and reset to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    /// Remember the comments page for a news item, clamped to at least 1
    pub fn set_comments_page(&mut self, news_id: NewsId, page: usize) {
        self.comment_pages.insert(news_id, page.max(1));
    }

    /// Remember page 1 for a news item unless a page is already remembered
    pub fn init_comments_page(&mut self, news_id: &NewsId) {
        if !self.comment_pages.contains_key(news_id) {
            self.comment_pages.insert(news_id.clone(), 1);
        }
    }

    /// Remembered comments page for a news item, 1 if none
    pub fn comments_page(&self, news_id: &str) -> usize {
        self.comment_pages.get(news_id).copied().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_resets_page() {
        let mut view = ViewState::new(10, 5);
        view.set_page(4);
        view.set_filter(ListFilter::Fake);
        assert_eq!(view.page(), 1);
        assert_eq!(view.filter(), ListFilter::Fake);
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut view = ViewState::new(10, 5);
        view.set_page(3);
        view.set_page_size(5);
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_size(), 5);
    }

    #[test]
    fn test_clamping() {
        let mut view = ViewState::new(0, 0);
        assert_eq!(view.page_size(), 1);
        assert_eq!(view.comments_page_size(), 1);
        view.set_page(0);
        assert_eq!(view.page(), 1);
        view.set_page_size(0);
        assert_eq!(view.page_size(), 1);
        view.set_comments_page(NewsId::from("n1"), 0);
        assert_eq!(view.comments_page("n1"), 1);
    }

    #[test]
    fn test_init_keeps_existing_comments_page() {
        let mut view = ViewState::new(10, 5);
        let id = NewsId::from("n1");
        view.set_comments_page(id.clone(), 3);
        view.init_comments_page(&id);
        assert_eq!(view.comments_page("n1"), 3);
        assert_eq!(view.comments_page("unknown"), 1);
    }
}
