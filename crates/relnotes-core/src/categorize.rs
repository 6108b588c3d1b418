//! Pull request categorization.

use relnotes_change::PullRequest;
use relnotes_config::Config;

/// A rendered changelog section: a category title and its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// The category title.
    pub category: String,

    /// Formatted lines, in fetch order.
    pub items: Vec<String>,
}

impl ChangelogEntry {
    fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            items: Vec::new(),
        }
    }
}

/// Assigns every pull request to exactly one category.
///
/// Rules are tried in declaration order and the first rule sharing a label
/// (case-insensitively) with the pull request wins. Pull requests matching no
/// rule go to the uncategorized section, which follows all rule sections.
/// Sections that end up empty are dropped.
pub fn categorize(config: &Config, pulls: &[PullRequest]) -> Vec<ChangelogEntry> {
    let mut entries: Vec<ChangelogEntry> = Vec::new();

    // Seed rule sections so they render in declaration order.
    for rule in &config.categories {
        if !entries.iter().any(|e| e.category == rule.title) {
            entries.push(ChangelogEntry::new(&rule.title));
        }
    }

    for pull in pulls {
        let title = config
            .categories
            .iter()
            .find(|rule| rule.matches_any(&pull.labels))
            .map_or(config.uncategorized_title.as_str(), |rule| rule.title.as_str());

        let idx = entries
            .iter()
            .position(|e| e.category == title)
            .unwrap_or_else(|| {
                entries.push(ChangelogEntry::new(title));
                entries.len() - 1
            });
        entries[idx].items.push(pull_line(pull));
    }

    entries.retain(|e| !e.items.is_empty());
    entries
}

/// Formats a pull request as `- {title} (#{number}) @{author}`.
fn pull_line(pull: &PullRequest) -> String {
    format!("- {} (#{}) @{}", pull.title, pull.number, pull.author)
}
