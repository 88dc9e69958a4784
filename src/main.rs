use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tokio::io::BufReader;

use ghprofile::config::{Cli, Config};
use ghprofile::github::GithubClient;
use ghprofile::prompt::{self, PromptEvent};
use ghprofile::session::Session;
use ghprofile::state::ViewState;
use ghprofile::{logging, render, svg};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    logging::init(&config.log_level)?;

    let client = GithubClient::new(&config)?;
    let mut session = Session::new(Arc::new(client));

    if config.interactive() {
        run_interactive(&mut session, &config).await
    } else {
        run_batch(&mut session, &config).await
    }
}

/// Look up each username from the command line in turn.
async fn run_batch(session: &mut Session<GithubClient>, config: &Config) -> Result<()> {
    let mut failures = 0usize;

    for username in &config.usernames {
        if let Err(e) = session.submit(username) {
            eprintln!("{username:?}: {e}");
            failures += 1;
            continue;
        }
        let state = session.settle().await;
        if matches!(state, ViewState::Failed { .. }) {
            failures += 1;
        }
        show(state, config)?;
    }

    if failures > 0 {
        bail!("{failures} of {} lookups failed", config.usernames.len());
    }
    Ok(())
}

/// Prompt for usernames until stdin closes.
async fn run_interactive(session: &mut Session<GithubClient>, config: &Config) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    prompt::run(session, input, |event| match event {
        PromptEvent::Ready => ready(),
        PromptEvent::Rejected(e) => {
            println!("{e}");
            Ok(())
        }
        PromptEvent::Submitted(state) => {
            if !config.json {
                print!("{}", render::render_state(state, today()));
            }
            Ok(())
        }
        PromptEvent::Settled(state) => show(state, config),
    })
    .await
}

fn show(state: &ViewState, config: &Config) -> Result<()> {
    if config.json {
        if let Some(payload) = render::render_json(state) {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    } else {
        print!("{}", render::render_state(state, today()));
    }

    if let (ViewState::Loaded { user, repos, .. }, Some(dir)) = (state, &config.svg_dir) {
        for path in svg::write_cards(dir, user, repos, today())? {
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn ready() -> Result<()> {
    print!("Search a Github user: ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}
