//! End-to-end changelog generation.

use relnotes_change::{Commit, PullRequest};
use relnotes_config::Config;
use relnotes_forge::{ForgeResult, RepoSlug, RepositoryQuery, TagRange};
use tracing::info;

use crate::{CoreResult, Mode, generate_changelog, resolve_range};

/// Input for a single run.
#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    /// Repository to describe.
    pub repo: RepoSlug,

    /// Older tag, or empty to use the tag preceding `to_tag`.
    pub from_tag: String,

    /// Newer tag, or empty to derive it from `current_ref`.
    pub to_tag: String,

    /// Reference that triggered the run, such as `refs/tags/v1.2.0`.
    pub current_ref: String,

    /// Sections to include.
    pub mode: Mode,
}

/// A generated changelog and the range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// The resolved tag range.
    pub range: TagRange,

    /// The rendered changelog document.
    pub body: String,
}

/// Resolves the range, fetches what the mode needs and renders the result.
pub struct Pipeline<Q> {
    query: Q,
    config: Config,
}

impl<Q: RepositoryQuery> Pipeline<Q> {
    /// Creates a new pipeline.
    #[must_use]
    pub fn new(query: Q, config: Config) -> Self {
        Self { query, config }
    }

    /// Runs the pipeline.
    ///
    /// Nothing beyond the tag list is fetched until the range is resolved.
    /// Pull requests and commits are then fetched concurrently, skipping
    /// whichever the mode does not render.
    ///
    /// # Errors
    ///
    /// Returns an error if the range cannot be resolved or a fetch fails.
    pub async fn run(&self, request: &ChangelogRequest) -> CoreResult<Changelog> {
        let range = resolve_range(
            &self.query,
            &request.repo,
            &request.from_tag,
            &request.to_tag,
            &request.current_ref,
        )
        .await?;

        let (pulls, commits) = tokio::try_join!(
            self.pulls(request, &range),
            self.commits(request, &range)
        )?;

        info!(
            repo = %request.repo,
            mode = %request.mode,
            pulls = pulls.len(),
            commits = commits.len(),
            "fetched changes"
        );

        let body = generate_changelog(
            &self.config,
            &pulls,
            &commits,
            request.mode,
            &range.from,
            &range.to,
        );

        Ok(Changelog { range, body })
    }

    async fn pulls(
        &self,
        request: &ChangelogRequest,
        range: &TagRange,
    ) -> ForgeResult<Vec<PullRequest>> {
        if !request.mode.includes_pulls() {
            return Ok(Vec::new());
        }
        self.query
            .fetch_merged_pull_requests(&request.repo, range)
            .await
    }

    async fn commits(&self, request: &ChangelogRequest, range: &TagRange) -> ForgeResult<Vec<Commit>> {
        if !request.mode.includes_commits() {
            return Ok(Vec::new());
        }
        self.query.fetch_commits(&request.repo, range).await
    }
}
