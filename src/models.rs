use serde::{Deserialize, Serialize};

/// A GitHub user as returned by `/users/{username}`.
///
/// The same endpoint answers an unknown login with `{"message": "Not Found", ...}`,
/// so every field tolerates absence and the marker lives alongside the profile data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub login: Option<String>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl UserProfile {
    /// True when the body carried the API's not-found marker instead of a profile.
    pub fn is_not_found(&self) -> bool {
        self.message.is_some()
    }

    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.login.as_deref())
            .unwrap_or("")
    }
}

/// One entry of `/users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub html_url: String,
    #[serde(default)]
    pub fork: bool,
}

/// Combined result of one lookup, exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAndRepos {
    pub user: UserProfile,
    pub repos: Vec<RepositorySummary>,
}

impl UserAndRepos {
    pub fn is_not_found(&self) -> bool {
        self.user.is_not_found()
    }
}
