//! Repository queries for relnotes.
//!
//! This crate provides the forge side of changelog generation:
//! - The [`RepositoryQuery`] trait the core consumes
//! - Range and repository identifiers ([`TagRange`], [`RepoSlug`])
//! - A GitHub REST implementation ([`GitHubClient`])

mod error;
mod github;
mod query;

pub use error::{ForgeError, ForgeResult};
pub use github::{DEFAULT_API_BASE, GitHubClient};
pub use query::{RepoSlug, RepositoryQuery, TagRange};
