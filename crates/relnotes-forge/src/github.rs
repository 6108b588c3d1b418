//! GitHub REST backend.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relnotes_change::{Commit, PullRequest};
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};

use crate::{ForgeError, ForgeResult, RepoSlug, RepositoryQuery, TagRange};

/// Public GitHub API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// GitHub's maximum page size.
const PULLS_PER_PAGE: usize = 100;

/// Author shown when the forge knows neither a login nor a name.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Tag entry from `GET /repos/{owner}/{repo}/tags`.
#[derive(Debug, Deserialize)]
struct GitHubTag {
    name: String,
}

/// Response from `GET /repos/{owner}/{repo}/compare/{basehead}`.
#[derive(Debug, Deserialize)]
struct Comparison {
    commits: Vec<GitHubCommit>,
}

/// Commit entry in a comparison.
#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: CommitDetail,
    author: Option<GitHubUser>,
    #[serde(default)]
    parents: Vec<IgnoredAny>,
}

/// Git-level commit data.
#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<GitAuthor>,
}

/// Git author signature.
#[derive(Debug, Deserialize)]
struct GitAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

/// GitHub account.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

/// Pull request entry from `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Deserialize)]
struct GitHubPull {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
    user: Option<GitHubUser>,
    merged_at: Option<DateTime<Utc>>,
    merge_commit_sha: Option<String>,
}

/// Label attached to a pull request.
#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: Option<String>,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubCommit {
    fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    fn into_commit(self) -> Commit {
        let (name, date) = match self.commit.author {
            Some(author) => (author.name, author.date),
            None => (None, None),
        };
        let author = self
            .author
            .map(|user| user.login)
            .or(name)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Commit::new(&self.sha, &self.commit.message, author, date)
    }
}

impl GitHubPull {
    /// Converts a closed pull request, keeping it only if it was merged into `range_shas`.
    fn into_merged_in(self, range_shas: &HashSet<String>) -> Option<PullRequest> {
        let merged_at = self.merged_at?;
        let merge_sha = self.merge_commit_sha.as_deref()?;
        if !range_shas.contains(merge_sha) {
            return None;
        }

        let author = self
            .user
            .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |user| user.login);

        Some(
            PullRequest::builder(self.number, self.title)
                .labels(self.labels.into_iter().map(|l| l.name.unwrap_or_default()))
                .author(author)
                .merged_at(merged_at)
                .build(),
        )
    }
}

/// GitHub REST API client.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: Option<String>) -> ForgeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ForgeError::Client)?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Points the client at another API base (GitHub Enterprise, test servers).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn repo_url(&self, repo: &RepoSlug, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, repo.owner, repo.name
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ForgeResult<T> {
        debug!(%url, ?query, "GET");

        let mut request = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ForgeError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for(response, status).await);
        }

        response.json().await.map_err(|source| ForgeError::Request {
            url: url.to_string(),
            source,
        })
    }

    async fn error_for(response: Response, status: StatusCode) -> ForgeError {
        let message = match response.json::<GitHubErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ForgeError::Unauthorized(message),
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ => ForgeError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn compare(&self, repo: &RepoSlug, range: &TagRange) -> ForgeResult<Comparison> {
        let url = self.repo_url(repo, &format!("compare/{}", range.basehead()));
        self.get_json(&url, &[]).await
    }
}

#[async_trait]
impl RepositoryQuery for GitHubClient {
    async fn list_tags(&self, repo: &RepoSlug, page_size: u8) -> ForgeResult<Vec<String>> {
        let url = self.repo_url(repo, "tags");
        let tags: Vec<GitHubTag> = self
            .get_json(&url, &[("per_page", page_size.to_string())])
            .await?;

        debug!(%repo, count = tags.len(), "listed tags");
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn fetch_merged_pull_requests(
        &self,
        repo: &RepoSlug,
        range: &TagRange,
    ) -> ForgeResult<Vec<PullRequest>> {
        let comparison = self.compare(repo, range).await?;
        let range_shas: HashSet<String> = comparison.commits.into_iter().map(|c| c.sha).collect();

        let url = self.repo_url(repo, "pulls");
        let mut pulls = Vec::new();
        let mut page: u32 = 1;

        loop {
            let batch: Vec<GitHubPull> = self
                .get_json(
                    &url,
                    &[
                        ("state", "closed".to_string()),
                        ("sort", "updated".to_string()),
                        ("direction", "desc".to_string()),
                        ("per_page", PULLS_PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let batch_len = batch.len();
            debug!(page, count = batch_len, "fetched closed pull requests");

            pulls.extend(
                batch
                    .into_iter()
                    .filter_map(|pr| pr.into_merged_in(&range_shas)),
            );

            if batch_len < PULLS_PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(count = pulls.len(), range = %range.basehead(), "found merged pull requests in range");
        Ok(pulls)
    }

    async fn fetch_commits(&self, repo: &RepoSlug, range: &TagRange) -> ForgeResult<Vec<Commit>> {
        let comparison = self.compare(repo, range).await?;

        let commits: Vec<Commit> = comparison
            .commits
            .into_iter()
            .filter(|c| !c.is_merge())
            .map(GitHubCommit::into_commit)
            .collect();

        info!(count = commits.len(), range = %range.basehead(), "found commits in range");
        Ok(commits)
    }
}
