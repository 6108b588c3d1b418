//! Commit type as listed in a comparison range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters kept from a full commit SHA.
const SHORT_SHA_LEN: usize = 7;

/// A commit within the comparison range.
///
/// Only the short SHA and the subject line are kept; merge commits never
/// reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The short commit SHA (first 7 characters).
    pub sha: String,

    /// The first line of the commit message.
    pub message: String,

    /// The forge login of the author, or the free-text author name.
    pub author: String,

    /// The author date, when the forge reports one.
    pub date: Option<DateTime<Utc>>,
}

impl Commit {
    /// Creates a new commit.
    ///
    /// The SHA is shortened and the message is cut down to its first line,
    /// so full values straight from the forge can be passed in.
    #[must_use]
    pub fn new(
        sha: impl AsRef<str>,
        message: impl AsRef<str>,
        author: impl Into<String>,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            sha: short_sha(sha.as_ref()).to_string(),
            message: subject(message.as_ref()).to_string(),
            author: author.into(),
            date,
        }
    }

    /// Returns true if the message contains `reference`, such as `#42`.
    ///
    /// This is plain substring containment: `#1` is also found inside `#12`.
    #[must_use]
    pub fn mentions(&self, reference: &str) -> bool {
        self.message.contains(reference)
    }
}

/// Returns the first 7 characters of a SHA.
fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Returns the first line of a commit message.
fn subject(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}
