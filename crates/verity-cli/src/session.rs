//! Opening the file-backed store a CLI session works on.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use tracing::info;
use verity_store::{FileStorage, NewsStore, SeedRepository};

/// Load seeds from `seeds_dir` and hydrate session data from `data_dir`.
///
/// Unreadable session data is not fatal: a warning is printed and the
/// store serves seed data for the affected collection.
pub fn open_store(
    config: &Config,
    seeds_dir: &Path,
    data_dir: &Path,
    formatter: &Formatter,
) -> Result<NewsStore<FileStorage>> {
    let seeds = SeedRepository::from_dir(seeds_dir)?;
    let (store, report) = NewsStore::open(FileStorage::new(data_dir), seeds, config.store.clone());

    info!(
        "Opened session in {} (votes: {:?}, comments: {:?})",
        data_dir.display(),
        report.votes,
        report.comments
    );
    if report.is_degraded() {
        eprintln!(
            "{}",
            formatter.warning("Saved session data could not be read; showing seed data. See 'verity errors'.")
        );
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::fs;
    use verity_store::VoteRequest;

    fn write_seeds(dir: &Path) {
        fs::write(
            dir.join("news.json"),
            r#"[{"id":"n1","title":"Bridge closed","reportedAt":"2024-05-01T08:00:00.000Z","isFake":false}]"#,
        )
        .unwrap();
        fs::write(dir.join("votes.json"), "[]").unwrap();
        fs::write(dir.join("comments.json"), "[]").unwrap();
    }

    #[test]
    fn test_votes_survive_between_sessions() {
        let seeds = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        write_seeds(seeds.path());
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let config = Config::default();

        let mut store = open_store(&config, seeds.path(), data.path(), &formatter).unwrap();
        store.submit_vote(VoteRequest::new("n1", true)).unwrap();
        drop(store);

        let store = open_store(&config, seeds.path(), data.path(), &formatter).unwrap();
        assert!(store.computed_status("n1"));
    }

    #[test]
    fn test_missing_seeds_is_fatal() {
        let empty = tempfile::tempdir().unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = open_store(&Config::default(), empty.path(), empty.path(), &formatter);
        assert!(matches!(result, Err(CliError::Seed(_))));
    }
}
