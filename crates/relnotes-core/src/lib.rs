//! Core library for relnotes.
//!
//! This crate turns a partial tag range into a finished changelog:
//! - [`resolve_range`] fills in missing tags from the event reference and tag list
//! - [`categorize`] sorts pull requests into configured categories
//! - [`generate_changelog`] reconciles pull requests and commits into one document
//! - [`Pipeline`] drives the whole run against a [`relnotes_forge::RepositoryQuery`]

mod categorize;
mod changelog;
mod error;
mod mode;
mod pipeline;
mod range;

#[cfg(test)]
mod testing;

pub use categorize::{ChangelogEntry, categorize};
pub use changelog::{NO_CHANGES_LINE, deduplicate, generate_changelog, render};
pub use error::{CoreError, CoreResult, RangeError};
pub use mode::Mode;
pub use pipeline::{Changelog, ChangelogRequest, Pipeline};
pub use range::{TAG_PAGE_SIZE, TAG_REF_PREFIX, previous_tag, resolve_range, tag_from_ref};
