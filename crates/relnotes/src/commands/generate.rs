//! Generate command.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use relnotes_config::{Config, find_config_from, load_config_or_default};
use relnotes_core::{Changelog, ChangelogRequest, Mode, Pipeline};
use relnotes_forge::{DEFAULT_API_BASE, GitHubClient, RepoSlug};
use tracing::{debug, info};

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repo: String,

    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Older tag (default: the tag preceding --to-tag)
    #[arg(long, default_value = "")]
    pub from_tag: String,

    /// Newer tag (default: derived from --ref)
    #[arg(long, default_value = "")]
    pub to_tag: String,

    /// Reference that triggered the run, e.g. refs/tags/v1.2.0
    #[arg(long = "ref", env = "GITHUB_REF", default_value = "")]
    pub reference: String,

    /// Sections to include: PR, COMMIT or HYBRID
    #[arg(short, long, default_value = "PR")]
    pub mode: String,

    /// Category configuration (default: relnotes.toml found from the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the changelog to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,
}

/// Runs the generate command.
pub fn run(args: GenerateArgs) -> Result<()> {
    // Reject bad input before any network activity
    let mode: Mode = args.mode.parse()?;
    let repo: RepoSlug = args.repo.parse().context("invalid --repo")?;
    let config = resolve_config(args.config.as_deref());

    let client = GitHubClient::new(args.token)
        .context("failed to create GitHub client")?
        .with_api_base(&args.api_url);
    debug!(api_base = client.api_base(), "using GitHub API");

    let request = ChangelogRequest {
        repo,
        from_tag: args.from_tag,
        to_tag: args.to_tag,
        current_ref: args.reference,
        mode,
    };

    let pipeline = Pipeline::new(client, config);
    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    let changelog = rt
        .block_on(pipeline.run(&request))
        .context("failed to generate changelog")?;

    // Step outputs go first so a failure there leaves nothing emitted
    if let Some(path) = std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
        write_step_outputs(Path::new(&path), &changelog)?;
    }

    emit(&changelog, args.output.as_deref())?;

    info!(
        from = %changelog.range.from,
        to = %changelog.range.to,
        "release notes generated"
    );
    Ok(())
}

fn resolve_config(explicit: Option<&Path>) -> Config {
    if explicit.is_some() {
        return load_config_or_default(explicit);
    }

    let found = std::env::current_dir()
        .ok()
        .and_then(find_config_from);
    load_config_or_default(found.as_deref())
}

fn emit(changelog: &Changelog, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", changelog.body))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote changelog to {}", path.display());
        }
        None => println!("{}", changelog.body),
    }
    Ok(())
}

/// Appends `changelog`, `from_tag` and `to_tag` to a workflow output file.
fn write_step_outputs(path: &Path, changelog: &Changelog) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let delimiter = delimiter_for(&changelog.body);
    let content = format!(
        "changelog<<{delimiter}\n{}\n{delimiter}\nfrom_tag={}\nto_tag={}\n",
        changelog.body, changelog.range.from, changelog.range.to
    );
    file.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    debug!(path = %path.display(), "wrote step outputs");
    Ok(())
}

/// Picks a heredoc delimiter that does not occur in `body`.
fn delimiter_for(body: &str) -> String {
    let mut delimiter = String::from("RELNOTES_EOF");
    while body.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}
