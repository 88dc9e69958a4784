//! Command-line options and the validated runtime configuration built from them.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/users/";
pub const DEFAULT_USER_AGENT: &str = concat!("ghprofile/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Parser)]
#[command(
    name = "ghprofile",
    version,
    about = "Look up a GitHub user's profile and public repositories"
)]
pub struct Cli {
    /// Users to look up; starts an interactive prompt when omitted
    #[arg(value_name = "USERNAME")]
    pub usernames: Vec<String>,

    /// Endpoint the username is appended to
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Write dark and light SVG profile cards into this directory
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Print the raw profile and repositories as JSON instead of a card
    #[arg(long)]
    pub json: bool,

    /// Log level for stderr diagnostics (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub usernames: Vec<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub svg_dir: Option<PathBuf>,
    pub json: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base_url = normalize_base_url(&cli.base_url)?;

        let timeout = match cli.timeout_secs {
            Some(0) => bail!("--timeout-secs must be greater than zero"),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        if cli.user_agent.trim().is_empty() {
            bail!("--user-agent must not be empty");
        }

        Ok(Self {
            usernames: cli.usernames,
            base_url,
            timeout,
            user_agent: cli.user_agent,
            svg_dir: cli.svg_dir,
            json: cli.json,
            log_level: cli.log_level,
        })
    }

    pub fn interactive(&self) -> bool {
        self.usernames.is_empty()
    }
}

/// Checks the scheme and makes sure the username can be appended directly.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("--base-url must not be empty");
    }

    let url = reqwest::Url::parse(trimmed)
        .with_context(|| format!("--base-url `{trimmed}` is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("--base-url must use http or https, got `{}`", url.scheme());
    }

    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}
