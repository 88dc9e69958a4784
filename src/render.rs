//! Text cards and JSON output for the terminal.

use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::age::AccountAge;
use crate::error::FetchError;
use crate::models::{RepositorySummary, UserProfile};
use crate::state::ViewState;
use crate::stats::RepoStats;

const MIN_ROW_WIDTH: usize = 40;
const LANGUAGES_SHOWN: usize = 3;

/// A `key: value` line of the profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub key: &'static str,
    pub value: String,
}

impl StatRow {
    fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    fn width(&self) -> usize {
        self.key.len() + 2 + self.value.chars().count()
    }
}

/// Splits a row into `("Key: ", dots, value)` so that all rows end at `align_width`.
pub fn dot_leader(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let available = align_width.saturating_sub(key_part.len() + value.chars().count());

    let dots = match available {
        0 => String::new(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    (key_part, dots, value.to_string())
}

/// Width every row of `rows` is padded to.
pub fn align_width(rows: &[StatRow]) -> usize {
    rows.iter()
        .map(StatRow::width)
        .max()
        .unwrap_or(0)
        .max(MIN_ROW_WIDTH)
}

/// Rows shown under a profile. Absent optional fields produce no row.
pub fn profile_rows(user: &UserProfile, repos: &[RepositorySummary], today: NaiveDate) -> Vec<StatRow> {
    let stats = RepoStats::from_repos(repos);
    let mut rows = vec![
        StatRow::new("Followers", user.followers.to_string()),
        StatRow::new("Following", user.following.to_string()),
        StatRow::new("Public Repositories", user.public_repos.to_string()),
    ];

    let optional = [
        ("Company", user.company.as_deref()),
        ("Location", user.location.as_deref()),
        ("Blog", user.blog.as_deref()),
    ];
    for (key, value) in optional {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            rows.push(StatRow::new(key, value));
        }
    }

    if let Some(age) = user
        .created_at
        .as_deref()
        .and_then(|created| AccountAge::from_created_at(created, today))
    {
        rows.push(StatRow::new("Joined", format!("{age} ago")));
    }

    rows.push(StatRow::new("Stars", stats.stars.to_string()));
    rows.push(StatRow::new("Forks", stats.forks.to_string()));
    if !stats.languages.is_empty() {
        rows.push(StatRow::new("Languages", stats.top_languages(LANGUAGES_SHOWN)));
    }

    rows
}

/// `"The Octocat (octocat)"`, or just the login when there is no display name.
pub fn title(user: &UserProfile) -> String {
    let login = user.login.as_deref().unwrap_or_default();
    match user.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) if name != login => format!("{name} ({login})"),
        _ => login.to_string(),
    }
}

pub fn render_profile(user: &UserProfile, repos: &[RepositorySummary], today: NaiveDate) -> String {
    let rows = profile_rows(user, repos, today);
    let width = align_width(&rows);
    let mut out = String::new();

    out.push_str(&title(user));
    out.push('\n');
    if let Some(bio) = user.bio.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        out.push_str(bio);
        out.push('\n');
    }
    out.push_str(&"-".repeat(width));
    out.push('\n');

    for row in &rows {
        let (key, dots, value) = dot_leader(row.key, &row.value, width);
        out.push_str(&format!("{key}{dots}{value}\n"));
    }

    if repos.is_empty() {
        out.push_str("\nNo public repositories\n");
        return out;
    }

    out.push_str(&format!("\nRepositories ({})\n", repos.len()));
    for repo in repos {
        out.push_str(&render_repo(repo));
    }
    out
}

fn render_repo(repo: &RepositorySummary) -> String {
    let mut facts = vec![
        format!("stars {}", repo.stargazers_count),
        format!("forks {}", repo.forks_count),
    ];
    if let Some(lang) = repo.language.as_deref() {
        facts.insert(0, lang.to_string());
    }
    if repo.fork {
        facts.push("fork".to_string());
    }

    let mut out = format!("  {} [{}]\n", repo.name, facts.join(", "));
    if let Some(desc) = repo.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        out.push_str(&format!("    {desc}\n"));
    }
    out.push_str(&format!("    {}\n", repo.html_url));
    out
}

/// Text for whatever the search screen currently shows.
pub fn render_state(state: &ViewState, today: NaiveDate) -> String {
    match state {
        ViewState::Idle => "Search a Github user\n".to_string(),
        ViewState::Loading { ticket } => format!("Loading {}...\n", ticket.username),
        ViewState::NotFound { .. } => "User Not Found\n".to_string(),
        ViewState::Failed { ticket, error } => {
            format!("Could not load {}: {error}\n", ticket.username)
        }
        ViewState::Loaded { user, repos, .. } => render_profile(user, repos, today),
    }
}

/// Machine-readable form of a settled state; `None` while idle or loading.
///
/// A profile is `{"user", "repos"}` exactly as fetched. An unknown user keeps
/// the same shape with the not-found marker; a failure becomes `{"username", "error"}`.
pub fn render_json(state: &ViewState) -> Option<Value> {
    match state {
        ViewState::Idle | ViewState::Loading { .. } => None,
        ViewState::Loaded { user, repos, .. } => Some(json!({ "user": user, "repos": repos })),
        ViewState::NotFound { ticket } => Some(json!({
            "username": ticket.username,
            "user": { "message": "Not Found" },
            "repos": [],
        })),
        ViewState::Failed { ticket, error } => {
            let error = match error {
                FetchError::Transport {
                    url,
                    status,
                    message,
                } => json!({ "kind": "transport", "url": url, "status": status, "message": message }),
                FetchError::Parse { url, message } => {
                    json!({ "kind": "parse", "url": url, "message": message })
                }
            };
            Some(json!({ "username": ticket.username, "error": error }))
        }
    }
}
