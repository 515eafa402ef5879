//! Comment flag inference
//!
//! Older seed comments were recorded without the truthfulness flag of the
//! vote they accompanied. Votes and comments submitted together share a
//! creation time (within a few milliseconds), so a vote on the same news item
//! created close enough to the comment is taken as its companion.

use crate::comment::Comment;
use crate::vote::Vote;
use chrono::Duration;

/// Default matching window between a comment and its companion vote
pub const DEFAULT_INFERENCE_TOLERANCE_MS: i64 = 2000;

/// Infer a missing flag for one comment
///
/// Returns the comment's own flag when present. Otherwise returns the flag of
/// the first vote, in the given order, created strictly less than
/// `tolerance` away from the comment. Votes are not sorted by proximity.
pub fn infer_flag(comment: &Comment, votes: &[Vote], tolerance: Duration) -> Option<bool> {
    if comment.is_fake.is_some() {
        return comment.is_fake;
    }

    let window = tolerance.num_milliseconds();
    votes
        .iter()
        .find(|vote| (vote.created_at - comment.created_at).num_milliseconds().abs() < window)
        .map(|vote| vote.is_fake)
}

/// Derive display copies of `comments` with missing flags backfilled
///
/// The stored comments are left untouched; comments with no matching vote
/// keep an absent flag.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use verity_domain::{infer_comment_flags, Comment, NewsId, Vote};
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let news = NewsId::from("n1");
/// let comment = Comment::new(news.clone(), "hmm".into(), None, t, None);
/// let vote = Vote::new(news, true, t + Duration::milliseconds(1500));
///
/// let inferred = infer_comment_flags(&[comment], &[vote], Duration::milliseconds(2000));
/// assert_eq!(inferred[0].is_fake, Some(true));
/// ```
pub fn infer_comment_flags(comments: &[Comment], votes: &[Vote], tolerance: Duration) -> Vec<Comment> {
    comments
        .iter()
        .map(|comment| {
            let mut derived = comment.clone();
            derived.is_fake = infer_flag(comment, votes, tolerance);
            derived
        })
        .collect()
}
