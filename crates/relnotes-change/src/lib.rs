//! Change types for relnotes.
//!
//! This crate provides the two views of history that a changelog reconciles:
//! - [`PullRequest`]: A merged pull request as reported by the forge
//! - [`Commit`]: A single-parent commit within the comparison range

mod commit;
mod pull;

pub use commit::Commit;
pub use pull::{PullRequest, PullRequestBuilder};
