//! Vote command implementation.

use crate::cli::VoteArgs;
use crate::error::Result;
use crate::output::Formatter;
use verity_store::{KeyValueStorage, NewsStore, VoteRequest};

/// Execute the vote command.
pub fn execute_vote<S: KeyValueStorage>(
    args: VoteArgs,
    store: &mut NewsStore<S>,
    formatter: &Formatter,
) -> Result<()> {
    let mut request = VoteRequest::new(args.id, args.fake);
    if let Some(text) = args.comment {
        request = request.with_comment(text);
    }
    if let Some(url) = args.image_url {
        request = request.with_image_url(url);
    }

    let submission = store.submit_vote(request)?;
    println!("{}", formatter.format_submission(&submission)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use crate::test_support::sample_store;
    use verity_domain::VoteCounts;

    fn args(id: &str, fake: bool, comment: Option<&str>) -> VoteArgs {
        VoteArgs {
            id: id.to_string(),
            fake,
            genuine: !fake,
            comment: comment.map(str::to_string),
            image_url: None,
        }
    }

    #[test]
    fn test_vote_flips_status() {
        let mut store = sample_store();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(!store.computed_status("n1"));

        execute_vote(args("n1", true, Some("seen this hoax before")), &mut store, &formatter).unwrap();
        assert_eq!(store.vote_counts("n1"), VoteCounts::new(1, 0));
        assert!(store.computed_status("n1"));
        assert_eq!(store.comments_for("n1").len(), 1);
    }

    #[test]
    fn test_vote_unknown_news() {
        let mut store = sample_store();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_vote(args("ghost", false, None), &mut store, &formatter);
        assert!(matches!(result, Err(CliError::Store(_))));
    }
}
