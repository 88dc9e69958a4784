//! Interactive search loop: one username per input line.
//!
//! A new search may be typed while the previous one is still loading; only the
//! newest one is shown. When the input closes, a search still in flight is
//! awaited and shown before returning.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::ValidationError;
use crate::session::{Applied, ProfileSource, Session};
use crate::state::ViewState;

/// What the loop wants displayed.
#[derive(Debug)]
pub enum PromptEvent<'a> {
    /// Ready for the next username.
    Ready,
    Rejected(&'a ValidationError),
    /// A search was accepted and is loading.
    Submitted(&'a ViewState),
    /// The current search has its answer.
    Settled(&'a ViewState),
}

pub async fn run<S, R, F>(session: &mut Session<S>, input: R, mut emit: F) -> Result<()>
where
    S: ProfileSource,
    R: AsyncBufRead + Unpin,
    F: FnMut(PromptEvent<'_>) -> Result<()>,
{
    let mut lines = input.lines();
    emit(PromptEvent::Ready)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match session.submit(&line) {
                    Ok(state) => emit(PromptEvent::Submitted(state))?,
                    Err(e) => {
                        emit(PromptEvent::Rejected(&e))?;
                        emit(PromptEvent::Ready)?;
                    }
                }
            }
            Some(applied) = session.next_completion() => {
                if applied == Applied::Current {
                    emit(PromptEvent::Settled(session.state()))?;
                    emit(PromptEvent::Ready)?;
                }
            }
        }
    }

    if matches!(session.state(), ViewState::Loading { .. }) {
        let state = session.settle().await;
        if !matches!(state, ViewState::Loading { .. }) {
            emit(PromptEvent::Settled(state))?;
        }
    }

    Ok(())
}
