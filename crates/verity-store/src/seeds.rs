//! Seed repository - the static data the store starts from

use crate::error::SeedError;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;
use verity_domain::{Comment, NewsDetail, NewsId, NewsItem, Vote};

/// News items file inside a seed directory
pub const NEWS_FILE: &str = "news.json";
/// Seed votes file
pub const VOTES_FILE: &str = "votes.json";
/// Seed comments file
pub const COMMENTS_FILE: &str = "comments.json";
/// Optional news detail file
pub const DETAILS_FILE: &str = "newsdetail.json";

/// Immutable seed collections
#[derive(Debug, Clone, Default)]
pub struct SeedRepository {
    /// News items, in file order
    pub news: Vec<NewsItem>,
    /// Seed votes
    pub votes: Vec<Vote>,
    /// Seed comments
    pub comments: Vec<Comment>,
    /// Detail pages, keyed by their `news_id`
    pub details: Vec<NewsDetail>,
}

impl SeedRepository {
    /// Build a repository from in-memory collections
    pub fn new(news: Vec<NewsItem>, votes: Vec<Vote>, comments: Vec<Comment>) -> Self {
        Self {
            news,
            votes,
            comments,
            details: Vec::new(),
        }
    }

    /// Attach detail pages
    pub fn with_details(mut self, details: Vec<NewsDetail>) -> Self {
        self.details = details;
        self
    }

    /// Load and validate a seed directory
    ///
    /// `news.json`, `votes.json` and `comments.json` are required;
    /// `newsdetail.json` is optional.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, SeedError> {
        let dir = dir.as_ref();
        let news = read_required(&dir.join(NEWS_FILE))?;
        let votes = read_required(&dir.join(VOTES_FILE))?;
        let comments = read_required(&dir.join(COMMENTS_FILE))?;
        let details = read_optional(&dir.join(DETAILS_FILE))?;

        let repo = Self::new(news, votes, comments).with_details(details);
        repo.validate()?;

        info!(
            "Loaded seeds from {}: {} news items, {} votes, {} comments, {} details",
            dir.display(),
            repo.news.len(),
            repo.votes.len(),
            repo.comments.len(),
            repo.details.len()
        );
        Ok(repo)
    }

    /// Check that news ids are unique and every record points at a news item
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut ids: HashSet<&NewsId> = HashSet::with_capacity(self.news.len());
        for item in &self.news {
            if !ids.insert(&item.id) {
                return Err(SeedError::DuplicateNews(item.id.clone()));
            }
        }

        let dangling = |record: String, news_id: &NewsId| SeedError::DanglingReference {
            record,
            news_id: news_id.clone(),
        };
        if let Some(v) = self.votes.iter().find(|v| !ids.contains(&v.news_id)) {
            return Err(dangling(format!("vote {}", v.id), &v.news_id));
        }
        if let Some(c) = self.comments.iter().find(|c| !ids.contains(&c.news_id)) {
            return Err(dangling(format!("comment {}", c.id), &c.news_id));
        }
        if let Some(d) = self.details.iter().find(|d| !ids.contains(&d.news_id)) {
            return Err(dangling("detail".to_string(), &d.news_id));
        }
        Ok(())
    }
}

fn read_required<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &raw)
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    match fs::read_to_string(path) {
        Ok(raw) => parse(path, &raw),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(SeedError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_from_dir_without_details() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            NEWS_FILE,
            r#"[{"id":"n1","title":"t","reportedAt":"2024-01-01T00:00:00.000Z","isFake":false}]"#,
        );
        write(
            dir.path(),
            VOTES_FILE,
            r#"[{"id":"v1","newsId":"n1","isFake":true,"createdAt":"2024-01-01T00:00:01.000Z"}]"#,
        );
        write(dir.path(), COMMENTS_FILE, "[]");

        let repo = SeedRepository::from_dir(dir.path()).unwrap();
        assert_eq!(repo.news.len(), 1);
        assert_eq!(repo.votes.len(), 1);
        assert!(repo.details.is_empty());
    }

    #[test]
    fn test_missing_required_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), NEWS_FILE, "[]");
        let err = SeedRepository::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), NEWS_FILE, "[{");
        write(dir.path(), VOTES_FILE, "[]");
        write(dir.path(), COMMENTS_FILE, "[]");
        let err = SeedRepository::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SeedError::Parse { .. }));
    }

    #[test]
    fn test_dangling_vote_rejected() {
        let news = vec![NewsItem::new("n1", "t", Utc::now(), false)];
        let votes = vec![Vote::new(NewsId::from("missing"), true, Utc::now())];
        let repo = SeedRepository::new(news, votes, Vec::new());
        assert!(matches!(repo.validate(), Err(SeedError::DanglingReference { .. })));
    }

    #[test]
    fn test_duplicate_news_rejected() {
        let news = vec![
            NewsItem::new("n1", "a", Utc::now(), false),
            NewsItem::new("n1", "b", Utc::now(), true),
        ];
        let repo = SeedRepository::new(news, Vec::new(), Vec::new());
        assert!(matches!(repo.validate(), Err(SeedError::DuplicateNews(_))));
    }
}
