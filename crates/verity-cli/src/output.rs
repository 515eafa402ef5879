//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use verity_domain::timestamp::to_iso;
use verity_domain::{page_window, Comment, NewsDetail, NewsItem, PageInfo, PageMarker, VoteCounts};
use verity_store::{Durability, ErrorEntry, Submission};

/// Pages shown either side of the current one in a pager line
const PAGER_SIBLINGS: usize = 1;

/// Longest summary shown in a list row before truncating
const SUMMARY_WIDTH: usize = 48;

/// One row of the news list.
#[derive(Debug, Clone, Copy)]
pub struct NewsRow<'a> {
    /// The news item
    pub item: &'a NewsItem,
    /// Current tally
    pub counts: VoteCounts,
    /// Computed status
    pub is_fake: bool,
}

/// Everything the detail view renders for one news item.
#[derive(Debug, Clone, Copy)]
pub struct NewsView<'a> {
    /// Row data for the item
    pub row: NewsRow<'a>,
    /// Extended content, if seeded
    pub detail: Option<&'a NewsDetail>,
    /// The current comments page, flags inferred
    pub comments: &'a [Comment],
    /// Position of that page
    pub comments_info: PageInfo,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a page of the news list.
    pub fn format_news_list(&self, rows: &[NewsRow<'_>], info: &PageInfo) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_news_list_json(rows, info),
            OutputFormat::Table => Ok(self.format_news_list_table(rows, info)),
            OutputFormat::Quiet => Ok(rows.iter().map(|r| r.item.id.to_string()).collect::<Vec<_>>().join("\n")),
        }
    }

    fn format_news_list_json(&self, rows: &[NewsRow<'_>], info: &PageInfo) -> Result<String> {
        let items: Vec<serde_json::Value> = rows.iter().map(news_json).collect();
        let json = serde_json::json!({
            "items": items,
            "page": info.page,
            "pageSize": info.page_size,
            "totalItems": info.total_items,
            "totalPages": info.total_pages,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_news_list_table(&self, rows: &[NewsRow<'_>], info: &PageInfo) -> String {
        if rows.is_empty() {
            return self.colorize("No news found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Status", "Title", "Summary", "Reporter", "Reported", "Fake", "Genuine"]);

        for row in rows {
            builder.push_record([
                row.item.id.to_string(),
                self.status_badge(row.is_fake),
                row.item.title.clone(),
                truncate(&row.item.summary, SUMMARY_WIDTH),
                row.item.reporter.clone(),
                row.item.reported_at.format("%Y-%m-%d").to_string(),
                row.counts.fake_count.to_string(),
                row.counts.non_fake_count.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}\n{}", table, self.page_summary(info), self.pager(info))
    }

    /// Format the detail view of one news item.
    pub fn format_news_detail(&self, view: &NewsView<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = news_json(&view.row);
                json["detail"] = serde_json::to_value(view.detail)?;
                json["comments"] = serde_json::to_value(view.comments)?;
                json["commentsPage"] = view.comments_info.page.into();
                json["commentsTotalPages"] = view.comments_info.total_pages.into();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(view.row.item.id.to_string()),
            OutputFormat::Table => Ok(self.format_news_detail_text(view)),
        }
    }

    fn format_news_detail_text(&self, view: &NewsView<'_>) -> String {
        let item = view.row.item;
        let mut out = String::new();

        out.push_str(&format!("{} {}\n", self.status_badge(view.row.is_fake), item.title));
        out.push_str(&format!(
            "Reported by {} on {}\n",
            if item.reporter.is_empty() { "unknown" } else { &item.reporter },
            item.reported_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!(
            "Votes: {} fake / {} genuine\n",
            view.row.counts.fake_count, view.row.counts.non_fake_count
        ));

        match view.detail {
            Some(detail) => {
                out.push('\n');
                out.push_str(&detail.full_detail);
                out.push('\n');
                if let Some(source) = &detail.source {
                    out.push_str(&format!("Source: {}\n", source));
                }
            }
            None if !item.summary.is_empty() => {
                out.push('\n');
                out.push_str(&item.summary);
                out.push('\n');
            }
            None => {}
        }

        out.push('\n');
        out.push_str(&self.format_comments(view.comments));
        if view.comments_info.total_items > 0 {
            out.push('\n');
            out.push_str(&self.page_summary(&view.comments_info));
            out.push('\n');
            out.push_str(&self.pager(&view.comments_info));
        }
        out
    }

    fn format_comments(&self, comments: &[Comment]) -> String {
        if comments.is_empty() {
            return self.colorize("No comments yet.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Vote", "Comment", "Image", "Posted"]);
        for comment in comments {
            let vote = match comment.is_fake {
                Some(is_fake) => self.status_badge(is_fake),
                None => "-".to_string(),
            };
            builder.push_record([
                vote,
                comment.text.clone(),
                comment.image_url.clone().unwrap_or_default(),
                comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Format the result of a vote.
    pub fn format_submission(&self, submission: &Submission) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "vote": submission.vote,
                "comment": submission.comment,
                "persisted": submission.durability == Durability::Persisted,
            }))?),
            OutputFormat::Quiet => Ok(submission.vote.id.to_string()),
            OutputFormat::Table => {
                let verdict = if submission.vote.is_fake { "fake" } else { "genuine" };
                let mut out = self.success(&format!(
                    "Voted {} on {} ({})",
                    verdict, submission.vote.news_id, submission.vote.id
                ));
                if submission.comment.is_some() {
                    out.push('\n');
                    out.push_str(&self.success("Comment added"));
                }
                if let Durability::Unsaved(reason) = &submission.durability {
                    out.push('\n');
                    out.push_str(&self.warning(&format!("Not saved, kept for this session only: {}", reason)));
                }
                Ok(out)
            }
        }
    }

    /// Format error log entries.
    pub fn format_errors(&self, entries: &[ErrorEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No errors recorded.", "green"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Time", "Context", "Message"]);
                for entry in entries {
                    builder.push_record([
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                        entry.context.clone(),
                        entry.message.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// "Showing 11 - 15 of 42"
    pub fn page_summary(&self, info: &PageInfo) -> String {
        format!("Showing {} - {} of {}", info.first_item, info.last_item, info.total_items)
    }

    /// Numbered pager line, current page bracketed: `‹ 1 … 4 [5] 6 … 12 ›`
    pub fn pager(&self, info: &PageInfo) -> String {
        let mut parts = Vec::new();
        if info.has_previous() {
            parts.push("‹".to_string());
        }
        for marker in page_window(info.page, info.total_pages, PAGER_SIBLINGS) {
            parts.push(match marker {
                PageMarker::Page(page) if page == info.page => self.colorize(&format!("[{}]", page), "cyan"),
                PageMarker::Page(page) => page.to_string(),
                PageMarker::Gap => "…".to_string(),
            });
        }
        if info.has_next() {
            parts.push("›".to_string());
        }
        parts.join(" ")
    }

    /// FAKE / GENUINE label.
    pub fn status_badge(&self, is_fake: bool) -> String {
        if is_fake {
            self.colorize("FAKE", "red")
        } else {
            self.colorize("GENUINE", "green")
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn news_json(row: &NewsRow<'_>) -> serde_json::Value {
    serde_json::json!({
        "id": row.item.id,
        "title": row.item.title,
        "summary": row.item.summary,
        "reporter": row.item.reporter,
        "reportedAt": to_iso(&row.item.reported_at),
        "imageUrl": row.item.image_url,
        "isFake": row.is_fake,
        "fakeCount": row.counts.fake_count,
        "nonFakeCount": row.counts.non_fake_count,
    })
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
