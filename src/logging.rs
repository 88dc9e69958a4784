//! Diagnostics go to stderr through a `tracing` fmt subscriber so stdout stays
//! reserved for cards and JSON.
//!
//! Initialization is idempotent for the same level; a second call asking for a
//! different level is rejected instead of silently ignored.

use anyhow::{Result, anyhow, bail};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INSTALLED_LEVEL: OnceLock<String> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG`, when set, overrides `level`.
pub fn init(level: &str) -> Result<()> {
    let level = normalize_level(level)?;

    if let Some(installed) = INSTALLED_LEVEL.get() {
        if *installed != level {
            bail!("logging already initialized at `{installed}`; refusing to switch to `{level}`");
        }
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .map_err(|e| anyhow!("invalid log filter `{level}`: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    let _ = INSTALLED_LEVEL.set(level);
    Ok(())
}

fn normalize_level(level: &str) -> Result<String> {
    let level = level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(level),
        _ => bail!("unsupported log level `{level}`; expected trace, debug, info, warn, error or off"),
    }
}
