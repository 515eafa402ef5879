//! List filter for the news list view

use std::fmt;
use std::str::FromStr;

/// Which news items the list view shows, by computed status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListFilter {
    /// Every news item
    #[default]
    All,
    /// Items currently judged fake
    Fake,
    /// Items currently judged genuine
    NonFake,
}

/// Returned when a filter name is not one of `all`, `fake`, `nonfake`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter '{}' (expected all, fake or nonfake)", self.0)
    }
}

impl std::error::Error for ParseFilterError {}

impl ListFilter {
    /// Get the filter name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ListFilter::All => "all",
            ListFilter::Fake => "fake",
            ListFilter::NonFake => "nonfake",
        }
    }

    /// Whether an item with the given computed status passes the filter
    pub fn matches(&self, is_fake: bool) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Fake => is_fake,
            ListFilter::NonFake => !is_fake,
        }
    }
}

impl FromStr for ListFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "fake" => Ok(ListFilter::Fake),
            "nonfake" | "non-fake" => Ok(ListFilter::NonFake),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for filter in [ListFilter::All, ListFilter::Fake, ListFilter::NonFake] {
            assert_eq!(filter.as_str().parse::<ListFilter>(), Ok(filter));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("maybe".parse::<ListFilter>().is_err());
        assert!("".parse::<ListFilter>().is_err());
    }

    #[test]
    fn test_matches() {
        assert!(ListFilter::All.matches(true));
        assert!(ListFilter::All.matches(false));
        assert!(ListFilter::Fake.matches(true));
        assert!(!ListFilter::Fake.matches(false));
        assert!(ListFilter::NonFake.matches(false));
        assert!(!ListFilter::NonFake.matches(true));
    }
}
