use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{FetchError, ValidationError};
use crate::github::GithubClient;
use crate::models::UserAndRepos;
use crate::state::{Event, Ticket, ViewState};
use crate::validate::validate_username;

/// Anything that can answer a lookup for a validated username.
#[async_trait]
pub trait ProfileSource: Send + Sync + 'static {
    async fn user_and_repos(&self, username: &str) -> Result<UserAndRepos, FetchError>;
}

#[async_trait]
impl ProfileSource for GithubClient {
    async fn user_and_repos(&self, username: &str) -> Result<UserAndRepos, FetchError> {
        GithubClient::user_and_repos(self, username).await
    }
}

/// What happened to a finished lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// It answered the current search and the state moved on.
    Current,
    /// A newer search was submitted meanwhile; the answer was dropped.
    Stale,
}

struct Completion {
    ticket: Ticket,
    result: Result<UserAndRepos, FetchError>,
}

/// Drives searches: each submission gets a fresh ticket and its own task, and
/// finished lookups are folded into the view state in arrival order.
pub struct Session<S> {
    source: Arc<S>,
    state: ViewState,
    next_id: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: ProfileSource> Session<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            state: ViewState::Idle,
            next_id: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Validate `raw` and start looking it up. Must be called inside a tokio runtime.
    ///
    /// Invalid input leaves the state untouched.
    pub fn submit(&mut self, raw: &str) -> Result<&ViewState, ValidationError> {
        let username = validate_username(raw)?;

        self.next_id += 1;
        let ticket = Ticket {
            id: self.next_id,
            username,
        };
        debug!(id = ticket.id, username = %ticket.username, "search submitted");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let task_ticket = ticket.clone();
        tokio::spawn(async move {
            let result = source.user_and_repos(&task_ticket.username).await;
            // The receiver lives as long as the session; nothing to do if it is gone.
            let _ = tx.send(Completion {
                ticket: task_ticket,
                result,
            });
        });

        self.transition(Event::Submitted(ticket));
        Ok(&self.state)
    }

    /// Wait for the next lookup to finish and fold it into the state.
    pub async fn next_completion(&mut self) -> Option<Applied> {
        let Completion { ticket, result } = self.rx.recv().await?;

        if !self.state.is_loading(&ticket) {
            debug!(id = ticket.id, username = %ticket.username, "discarding stale response");
            return Some(Applied::Stale);
        }

        self.transition(Event::Completed { ticket, result });
        Some(Applied::Current)
    }

    /// Wait until the current search has an answer. Returns immediately when
    /// nothing is loading.
    pub async fn settle(&mut self) -> &ViewState {
        while matches!(self.state, ViewState::Loading { .. }) {
            if self.next_completion().await.is_none() {
                break;
            }
        }
        &self.state
    }

    pub fn clear(&mut self) {
        self.transition(Event::Cleared);
    }

    fn transition(&mut self, event: Event) {
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(event);
    }
}
