//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "relnotes.toml";

/// Loads and validates configuration from the given path.
///
/// Files with a `.json` extension are parsed as JSON, everything else as TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: Config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    config.validate()?;

    Ok(config)
}

/// Loads configuration, substituting the defaults when it is unavailable.
///
/// Never fails: a missing path is expected and logged at info level, while a
/// file that cannot be loaded produces a warning before falling back.
pub fn load_config_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        info!("no config file specified, using default category mappings");
        return Config::default();
    };

    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to load config, falling back to defaults"
            );
            Config::default()
        }
    }
}

/// Finds a configuration file starting from the given directory.
///
/// Walks up the directory tree until a `relnotes.toml` is found.
#[must_use]
pub fn find_config_from(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut dir = start_dir.as_ref();

    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return None,
        }
    }
}
