use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{RepositorySummary, UserAndRepos, UserProfile};

/// Status line and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The API's `message` when this is a 404 carrying the not-found marker.
    fn not_found_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct Marker {
            message: String,
        }

        if self.status != 404 {
            return None;
        }
        serde_json::from_str::<Marker>(&self.body)
            .ok()
            .map(|m| m.message)
    }

    /// The API's `message`, if the body has one, for error reporting.
    fn api_message(&self) -> String {
        #[derive(Deserialize)]
        struct Message {
            message: String,
        }

        serde_json::from_str::<Message>(&self.body)
            .map(|m| m.message)
            .unwrap_or_else(|_| self.body.chars().take(200).collect())
    }
}

/// A single unauthenticated HTTP GET. Network failures come back as
/// [`FetchError::Transport`]; any status, success or not, is a response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// reqwest-backed transport with the headers the GitHub API expects.
#[derive(Clone)]
pub struct HttpTransport {
    http: Arc<Client>,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("Invalid User-Agent value")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: Arc::new(builder.build().context("Failed to build HTTP client")?),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        debug!(url, "sending request");

        let resp = self.http.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                format!("network error: {e}")
            };
            FetchError::transport(url, None, message)
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            FetchError::transport(url, Some(status), format!("failed to read body: {e}"))
        })?;

        debug!(url, status, bytes = body.len(), "received response");
        Ok(RawResponse { status, body })
    }
}

/// Fetches `{base_url}{username}` and `{base_url}{username}/repos` concurrently
/// and combines them.
///
/// Either both bodies are usable or the whole lookup fails; a repository list is
/// never defaulted to empty because its request failed. An unknown user is a
/// successful result whose `user` carries the not-found marker.
pub async fn fetch_user_and_repos<T>(
    transport: &T,
    base_url: &str,
    username: &str,
) -> Result<UserAndRepos, FetchError>
where
    T: Transport + ?Sized,
{
    let user_url = format!("{base_url}{username}");
    let repos_url = format!("{base_url}{username}/repos");

    let (user_resp, repos_resp) =
        tokio::join!(transport.get(&user_url), transport.get(&repos_url));

    let result = user_resp.and_then(|user_resp| {
        let repos_resp = repos_resp?;
        let user = decode_user(&user_url, &user_resp)?;
        let repos = decode_repos(&repos_url, &repos_resp, user.is_not_found())?;
        Ok(UserAndRepos { user, repos })
    });

    match &result {
        Ok(found) if found.is_not_found() => info!(username, "user not found"),
        Ok(found) => info!(username, repos = found.repos.len(), "fetched profile"),
        Err(e) => warn!(username, error = %e, "lookup failed"),
    }

    result
}

fn decode_user(url: &str, resp: &RawResponse) -> Result<UserProfile, FetchError> {
    if let Some(message) = resp.not_found_message() {
        return Ok(UserProfile {
            message: Some(message),
            ..UserProfile::default()
        });
    }

    if !resp.is_success() {
        return Err(FetchError::transport(
            url,
            Some(resp.status),
            resp.api_message(),
        ));
    }

    let user: UserProfile = serde_json::from_str(&resp.body)
        .map_err(|e| FetchError::parse(url, format!("failed to decode user profile: {e}")))?;

    if user.login.is_none() && !user.is_not_found() {
        return Err(FetchError::parse(url, "profile has neither login nor message"));
    }
    Ok(user)
}

fn decode_repos(
    url: &str,
    resp: &RawResponse,
    user_missing: bool,
) -> Result<Vec<RepositorySummary>, FetchError> {
    if user_missing && (resp.not_found_message().is_some() || resp.is_success()) {
        // The list of a user that does not exist carries nothing worth showing.
        return Ok(Vec::new());
    }

    if !resp.is_success() {
        return Err(FetchError::transport(
            url,
            Some(resp.status),
            resp.api_message(),
        ));
    }

    serde_json::from_str(&resp.body)
        .map_err(|e| FetchError::parse(url, format!("failed to decode repository list: {e}")))
}

/// A lookup client bound to one base URL.
#[derive(Clone)]
pub struct GithubClient {
    base_url: Arc<String>,
    transport: Arc<dyn Transport>,
}

impl GithubClient {
    /// Create a client talking to the configured base URL over HTTP.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self::with_transport(&config.base_url, Arc::new(transport)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: Arc::new(base_url.to_string()),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up `username`; see [`fetch_user_and_repos`].
    pub async fn user_and_repos(&self, username: &str) -> Result<UserAndRepos, FetchError> {
        fetch_user_and_repos(self.transport.as_ref(), &self.base_url, username).await
    }
}
