//! List command implementation.

use crate::cli::ListArgs;
use crate::error::{CliError, Result};
use crate::output::{Formatter, NewsRow};
use verity_domain::NewsItem;
use verity_store::{KeyValueStorage, NewsStore};

/// Execute the list command.
pub fn execute_list<S: KeyValueStorage>(
    args: ListArgs,
    store: &mut NewsStore<S>,
    formatter: &Formatter,
) -> Result<()> {
    if args.page == 0 {
        return Err(CliError::InvalidInput("Page must be at least 1".to_string()));
    }

    store.set_filter(args.filter.into());
    if let Some(size) = args.page_size {
        if size == 0 {
            return Err(CliError::InvalidInput("Page size must be at least 1".to_string()));
        }
        store.set_page_size(size);
    }
    store.set_page(args.page);

    println!("{}", render_list(store, formatter)?);
    Ok(())
}

/// Render the current list page as the store's view state describes it.
pub fn render_list<S: KeyValueStorage>(store: &NewsStore<S>, formatter: &Formatter) -> Result<String> {
    let rows: Vec<NewsRow<'_>> = store
        .paged_news()
        .into_iter()
        .map(|item| news_row(store, item))
        .collect();
    formatter.format_news_list(&rows, &store.list_page_info())
}

/// Tally and status for one news item.
pub fn news_row<'a, S: KeyValueStorage>(store: &NewsStore<S>, item: &'a NewsItem) -> NewsRow<'a> {
    NewsRow {
        item,
        counts: store.vote_counts(item.id.as_str()),
        is_fake: store.computed_status(item.id.as_str()),
    }
}
