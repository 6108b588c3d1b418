//! Configuration management for relnotes.
//!
//! This crate handles loading and validating the category rules that drive
//! pull request classification, usually from a `relnotes.toml` file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_config_from, load_config, load_config_or_default};
pub use schema::{CategoryRule, Config, DEFAULT_UNCATEGORIZED_TITLE};
