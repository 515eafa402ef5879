//! Vote tallies and the status tie-break rule

use crate::vote::Vote;

/// Fake / non-fake vote counts for one news item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteCounts {
    /// Votes judging the item fake
    pub fake_count: usize,
    /// Votes judging the item genuine
    pub non_fake_count: usize,
}

impl VoteCounts {
    /// Tally a sequence of votes
    ///
    /// # Examples
    ///
    /// ```
    /// use verity_domain::VoteCounts;
    ///
    /// let counts = VoteCounts::new(3, 1);
    /// assert_eq!(counts.total(), 4);
    /// assert!(counts.resolve(false));
    /// ```
    pub fn tally<'a, I>(votes: I) -> Self
    where
        I: IntoIterator<Item = &'a Vote>,
    {
        let mut counts = Self::default();
        for vote in votes {
            if vote.is_fake {
                counts.fake_count += 1;
            } else {
                counts.non_fake_count += 1;
            }
        }
        counts
    }

    /// Build counts directly
    pub fn new(fake_count: usize, non_fake_count: usize) -> Self {
        Self {
            fake_count,
            non_fake_count,
        }
    }

    /// Total number of votes
    pub fn total(&self) -> usize {
        self.fake_count + self.non_fake_count
    }

    /// Zero votes or an exact split
    pub fn is_undecided(&self) -> bool {
        self.total() == 0 || self.fake_count == self.non_fake_count
    }

    /// Resolve the "is fake" status
    ///
    /// Falls back to `seed_default` when there are no votes or the votes are
    /// tied; otherwise the majority side wins.
    pub fn resolve(&self, seed_default: bool) -> bool {
        if self.is_undecided() {
            seed_default
        } else {
            self.fake_count > self.non_fake_count
        }
    }
}
