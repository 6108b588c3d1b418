//! Merged pull request type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request merged within the comparison range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number.
    pub number: u64,

    /// The pull request title.
    pub title: String,

    /// Label names, as returned by the forge.
    pub labels: Vec<String>,

    /// The author login.
    pub author: String,

    /// When the pull request was merged.
    pub merged_at: DateTime<Utc>,
}

impl PullRequest {
    /// Creates a new pull request builder.
    #[must_use]
    pub fn builder(number: u64, title: impl Into<String>) -> PullRequestBuilder {
        PullRequestBuilder::new(number, title)
    }

    /// Returns the textual reference to this pull request (`#42`).
    #[must_use]
    pub fn reference(&self) -> String {
        format!("#{}", self.number)
    }
}

/// Builder for [`PullRequest`].
#[derive(Debug)]
pub struct PullRequestBuilder {
    number: u64,
    title: String,
    labels: Vec<String>,
    author: String,
    merged_at: DateTime<Utc>,
}

impl PullRequestBuilder {
    /// Creates a new builder with required fields.
    fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            labels: Vec::new(),
            author: "unknown".to_string(),
            merged_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Replaces all labels.
    #[must_use]
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the merge date.
    #[must_use]
    pub fn merged_at(mut self, merged_at: DateTime<Utc>) -> Self {
        self.merged_at = merged_at;
        self
    }

    /// Builds the [`PullRequest`].
    #[must_use]
    pub fn build(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            labels: self.labels,
            author: self.author,
            merged_at: self.merged_at,
        }
    }
}
