//! In-memory repository used by the core tests.

use std::sync::Mutex;

use async_trait::async_trait;
use relnotes_change::{Commit, PullRequest};
use relnotes_forge::{ForgeError, ForgeResult, RepoSlug, RepositoryQuery, TagRange};

/// A repository whose answers are fixed up front.
#[derive(Default)]
pub struct FakeRepository {
    pub tags: Vec<String>,
    pub pulls: Vec<PullRequest>,
    pub commits: Vec<Commit>,
    pub fail_tags: bool,
    pub fail_pulls: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeRepository {
    pub fn with_tags(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Names of the queries made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositoryQuery for FakeRepository {
    async fn list_tags(&self, _repo: &RepoSlug, page_size: u8) -> ForgeResult<Vec<String>> {
        self.record("list_tags");
        if self.fail_tags {
            return Err(ForgeError::RateLimited);
        }
        Ok(self.tags.iter().take(usize::from(page_size)).cloned().collect())
    }

    async fn fetch_merged_pull_requests(
        &self,
        _repo: &RepoSlug,
        _range: &TagRange,
    ) -> ForgeResult<Vec<PullRequest>> {
        self.record("fetch_merged_pull_requests");
        if self.fail_pulls {
            return Err(ForgeError::NotFound("compare".to_string()));
        }
        Ok(self.pulls.clone())
    }

    async fn fetch_commits(&self, _repo: &RepoSlug, _range: &TagRange) -> ForgeResult<Vec<Commit>> {
        self.record("fetch_commits");
        Ok(self.commits.clone())
    }
}
