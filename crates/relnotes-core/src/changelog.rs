//! Changelog rendering.

use std::fmt::Write;

use relnotes_change::{Commit, PullRequest};
use relnotes_config::Config;

use crate::{ChangelogEntry, Mode, categorize};

/// Body used when no section has any content.
pub const NO_CHANGES_LINE: &str = "_No notable changes in this release._";

/// Returns the commits not already represented by a pull request.
///
/// A commit is considered represented when its message contains `#{number}`
/// for any of `pulls`. This is a plain substring check, so `#1` also matches a
/// message mentioning `#12`.
pub fn deduplicate<'a>(commits: &'a [Commit], pulls: &[PullRequest]) -> Vec<&'a Commit> {
    commits
        .iter()
        .filter(|commit| !pulls.iter().any(|pull| commit.mentions(&pull.reference())))
        .collect()
}

/// Renders categorized entries and commits into the changelog document.
///
/// Commits are deduplicated against `pulls` before rendering. Blocks are
/// separated by a blank line and the result carries no surrounding
/// whitespace.
pub fn render(
    entries: &[ChangelogEntry],
    commits: &[Commit],
    pulls: &[PullRequest],
    mode: Mode,
    from_tag: &str,
    to_tag: &str,
) -> String {
    let mut blocks = vec![format!("## What's Changed ({from_tag} → {to_tag})")];

    if mode.includes_pulls() {
        for entry in entries.iter().filter(|e| !e.items.is_empty()) {
            blocks.push(format!("### {}\n\n{}", entry.category, entry.items.join("\n")));
        }
    }

    if mode.includes_commits() {
        let remaining = deduplicate(commits, pulls);
        if !remaining.is_empty() {
            let mut block = String::from("### Commits\n");
            for commit in remaining {
                _ = write!(
                    block,
                    "\n- `{}` {} (@{})",
                    commit.sha, commit.message, commit.author
                );
            }
            blocks.push(block);
        }
    }

    if blocks.len() == 1 {
        blocks.push(NO_CHANGES_LINE.to_string());
    }

    blocks.join("\n\n").trim().to_string()
}

/// Builds the changelog for a resolved range.
///
/// Pure: the output depends only on the arguments.
pub fn generate_changelog(
    config: &Config,
    pulls: &[PullRequest],
    commits: &[Commit],
    mode: Mode,
    from_tag: &str,
    to_tag: &str,
) -> String {
    let entries = if mode.includes_pulls() {
        categorize(config, pulls)
    } else {
        Vec::new()
    };
    render(&entries, commits, pulls, mode, from_tag, to_tag)
}
