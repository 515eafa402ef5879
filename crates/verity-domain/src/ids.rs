//! Identifier newtypes for news items, votes and comments

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a news item, assigned by the seed data
    NewsId
}

string_id! {
    /// Identifier of a vote
    ///
    /// Seed votes keep whatever id the seed file gives them; votes created
    /// at runtime get a `v_`-prefixed UUIDv7 (see [`VoteId::generate`]).
    VoteId
}

string_id! {
    /// Identifier of a comment
    ///
    /// Generated comment ids use the `c_` prefix.
    CommentId
}

/// Build `<prefix>_<uuidv7>`.
///
/// UUIDv7 keeps generated ids unique without coordination and sortable by
/// creation time.
fn fresh(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::now_v7().simple())
}

impl VoteId {
    /// Generate a fresh, unique vote id
    ///
    /// # Examples
    ///
    /// ```
    /// use verity_domain::VoteId;
    ///
    /// let id = VoteId::generate();
    /// assert!(id.as_str().starts_with("v_"));
    /// ```
    pub fn generate() -> Self {
        Self(fresh("v"))
    }
}

impl CommentId {
    /// Generate a fresh, unique comment id
    pub fn generate() -> Self {
        Self(fresh("c"))
    }
}
