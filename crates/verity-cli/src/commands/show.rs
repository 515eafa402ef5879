//! Show command implementation.

use crate::cli::ShowArgs;
use crate::commands::news_row;
use crate::error::{CliError, Result};
use crate::output::{Formatter, NewsView};
use verity_store::{KeyValueStorage, NewsStore};

/// Execute the show command.
pub fn execute_show<S: KeyValueStorage>(
    args: ShowArgs,
    store: &mut NewsStore<S>,
    formatter: &Formatter,
) -> Result<()> {
    store.guard_news(&args.id)?;
    if let Some(page) = args.page {
        if page == 0 {
            return Err(CliError::InvalidInput("Page must be at least 1".to_string()));
        }
        store.set_detail_comments_page(args.id.as_str(), page);
    }

    println!("{}", render_show(store, &args.id, formatter)?);
    Ok(())
}

/// Render a news item with its remembered comments page.
pub fn render_show<S: KeyValueStorage>(
    store: &NewsStore<S>,
    news_id: &str,
    formatter: &Formatter,
) -> Result<String> {
    let item = store.guard_news(news_id)?;
    let comments = store.comments_page(news_id, None);
    let view = NewsView {
        row: news_row(store, item),
        detail: store.news_detail(news_id),
        comments: &comments,
        comments_info: store.comments_page_info(news_id, None),
    };
    formatter.format_news_detail(&view)
}
