//! Repository query interface.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use relnotes_change::{Commit, PullRequest};

use crate::{ForgeError, ForgeResult};

/// A repository on a forge, written `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    /// The owning user or organization.
    pub owner: String,

    /// The repository name.
    pub name: String,
}

impl RepoSlug {
    /// Creates a new repository slug.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoSlug {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| ForgeError::InvalidSlug(s.to_string()))?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ForgeError::InvalidSlug(s.to_string()));
        }

        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The pair of tags bounding a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRange {
    /// The older tag (exclusive).
    pub from: String,

    /// The newer tag (inclusive).
    pub to: String,
}

impl TagRange {
    /// Creates a new tag range.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the three-dot comparison range (`v1.0.0...v1.1.0`).
    #[must_use]
    pub fn basehead(&self) -> String {
        format!("{}...{}", self.from, self.to)
    }
}

/// Read-only queries against a hosted repository.
///
/// Implementations own transport concerns (auth, retries, timeouts); callers
/// treat every error as fatal.
#[async_trait]
pub trait RepositoryQuery: Send + Sync {
    /// Lists up to `page_size` tag names, newest first.
    async fn list_tags(&self, repo: &RepoSlug, page_size: u8) -> ForgeResult<Vec<String>>;

    /// Fetches pull requests whose merge commit lies within `range`.
    async fn fetch_merged_pull_requests(
        &self,
        repo: &RepoSlug,
        range: &TagRange,
    ) -> ForgeResult<Vec<PullRequest>>;

    /// Fetches the single-parent commits within `range`.
    async fn fetch_commits(&self, repo: &RepoSlug, range: &TagRange) -> ForgeResult<Vec<Commit>>;
}
