//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Title of the catch-all category when none is configured.
pub const DEFAULT_UNCATEGORIZED_TITLE: &str = "Other Changes";

/// Main configuration structure.
///
/// Missing fields fall back to their defaults individually, so a file that
/// only sets `uncategorized_title` keeps the default category rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Title of the section holding pull requests that match no rule.
    #[serde(
        default = "default_uncategorized_title",
        alias = "uncategorizedTitle"
    )]
    pub uncategorized_title: String,

    /// Category rules, in precedence order.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uncategorized_title: default_uncategorized_title(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Checks that every rule can match something and every title renders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on the first offending entry.
    pub fn validate(&self) -> ConfigResult<()> {
        for (idx, rule) in self.categories.iter().enumerate() {
            if rule.title.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category {} has an empty title",
                    idx + 1
                )));
            }
            if rule.labels.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category \"{}\" has no labels",
                    rule.title
                )));
            }
        }

        if self.uncategorized_title.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "uncategorized_title must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// A category rule: pull requests carrying any of `labels` land under `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Section title.
    pub title: String,

    /// Labels selecting this category.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl CategoryRule {
    /// Creates a new category rule.
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `label` selects this rule, ignoring case.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.labels.iter().any(|l| l.to_lowercase() == label)
    }

    /// Returns true if any of `labels` selects this rule.
    #[must_use]
    pub fn matches_any(&self, labels: &[String]) -> bool {
        labels.iter().any(|l| self.matches(l))
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("Breaking Changes", ["breaking", "breaking-change"]),
        CategoryRule::new("New Features", ["feature", "enhancement"]),
        CategoryRule::new("Bug Fixes", ["bug", "bugfix", "fix"]),
        CategoryRule::new("Documentation", ["documentation", "docs"]),
        CategoryRule::new("Maintenance", ["chore", "maintenance", "refactor"]),
        CategoryRule::new("Dependencies", ["dependencies", "deps"]),
    ]
}

fn default_uncategorized_title() -> String {
    DEFAULT_UNCATEGORIZED_TITLE.to_string()
}
