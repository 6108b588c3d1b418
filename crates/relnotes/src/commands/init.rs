//! Initialize command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use relnotes_config::{CONFIG_FILE_NAME, Config};
use tracing::info;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to write the configuration into
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Runs the init command.
pub fn run(args: &InitArgs) -> Result<()> {
    let path = args.dir.join(CONFIG_FILE_NAME);

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content = Config::default()
        .to_toml()
        .context("failed to serialize default configuration")?;
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote default configuration");
    println!("Created {}", path.display());

    Ok(())
}
