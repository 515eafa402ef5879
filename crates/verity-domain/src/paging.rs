//! Pagination math shared by the list and comment views
//!
//! Pages are 1-indexed. A page number below 1 is treated as page 1 and a page
//! size below 1 as size 1, so none of these functions can fail.

use std::collections::BTreeSet;

/// Pages listed in full before the pager starts eliding with gaps
const FULL_WINDOW_PAGES: usize = 7;

/// Slice out one page of `items`
///
/// Equivalent to `items[size*(page-1) .. size*page]`, truncated to the end of
/// the slice and empty past it.
///
/// # Examples
///
/// ```
/// use verity_domain::page_slice;
///
/// let items: Vec<u32> = (1..=12).collect();
/// assert_eq!(page_slice(&items, 3, 5), &[11, 12]);
/// assert!(page_slice(&items, 4, 5).is_empty());
/// ```
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = bounds(items.len(), page, page_size);
    &items[start..end]
}

fn bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = page_size.saturating_mul(page - 1).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

/// Summary of one page, for "Showing 11 - 15 of 42" and "Page 2 of 3" lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page (1-indexed, after clamping)
    pub page: usize,
    /// Items per page
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    /// 1-based index of the first item shown, 0 when the page is empty
    pub first_item: usize,
    /// 1-based index of the last item shown, 0 when the page is empty
    pub last_item: usize,
}

impl PageInfo {
    /// Describe `page` of a collection holding `total_items`
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let (start, end) = bounds(total_items, page, page_size);
        let (first_item, last_item) = if start == end { (0, 0) } else { (start + 1, end) };

        Self {
            page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size).max(1),
            first_item,
            last_item,
        }
    }

    /// Whether a page follows this one
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page precedes this one
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One entry of a numbered pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// A clickable page number
    Page(usize),
    /// Elided run of pages
    Gap,
}

/// Page numbers to render in a numbered pager
///
/// Up to seven pages are all listed. Beyond that the first and last pages,
/// the current page and `siblings` pages either side of it are listed, with
/// [`PageMarker::Gap`] where pages are elided. A gap never hides a single
/// page; that page is listed instead.
pub fn page_window(current: usize, total_pages: usize, siblings: usize) -> Vec<PageMarker> {
    let total_pages = total_pages.max(1);
    if total_pages <= FULL_WINDOW_PAGES {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut shown = BTreeSet::new();
    shown.insert(1);
    shown.insert(total_pages);
    let low = current.saturating_sub(siblings).max(1);
    let high = current.saturating_add(siblings).min(total_pages);
    shown.extend(low..=high);

    let mut markers = Vec::with_capacity(shown.len() * 2);
    let mut previous: Option<usize> = None;
    for page in shown {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => markers.push(PageMarker::Page(prev + 1)),
                _ => markers.push(PageMarker::Gap),
            }
        }
        markers.push(PageMarker::Page(page));
        previous = Some(page);
    }
    markers
}
