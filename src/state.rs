//! View state of the search screen as an immutable snapshot.
//!
//! Every change goes through [`ViewState::apply`]. A completed lookup is only
//! accepted while the state is still loading the same [`Ticket`], which is how a
//! slow answer to an older search is kept from replacing a newer one.

use crate::error::FetchError;
use crate::models::{RepositorySummary, UserAndRepos, UserProfile};

/// Identifies one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        ticket: Ticket,
    },
    Loaded {
        ticket: Ticket,
        user: UserProfile,
        repos: Vec<RepositorySummary>,
    },
    NotFound {
        ticket: Ticket,
    },
    Failed {
        ticket: Ticket,
        error: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submitted(Ticket),
    Completed {
        ticket: Ticket,
        result: Result<UserAndRepos, FetchError>,
    },
    Cleared,
}

impl ViewState {
    pub fn apply(self, event: Event) -> ViewState {
        match event {
            Event::Submitted(ticket) => ViewState::Loading { ticket },
            Event::Cleared => ViewState::Idle,
            Event::Completed { ticket, result } => {
                if !self.is_loading(&ticket) {
                    return self;
                }
                match result {
                    Ok(found) if found.is_not_found() => ViewState::NotFound { ticket },
                    Ok(UserAndRepos { user, repos }) => ViewState::Loaded {
                        ticket,
                        user,
                        repos,
                    },
                    Err(error) => ViewState::Failed { ticket, error },
                }
            }
        }
    }

    /// True while waiting on exactly this search.
    pub fn is_loading(&self, ticket: &Ticket) -> bool {
        matches!(self, ViewState::Loading { ticket: current } if current == ticket)
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { ticket }
            | ViewState::Loaded { ticket, .. }
            | ViewState::NotFound { ticket }
            | ViewState::Failed { ticket, .. } => Some(ticket),
        }
    }
}
