// Integration tests for the user + repositories lookup, driven through fake transports.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

use ghprofile::error::FetchError;
use ghprofile::github::{GithubClient, RawResponse, Transport, fetch_user_and_repos};

const BASE: &str = "https://api.github.com/users/";

fn octocat_profile() -> RawResponse {
    RawResponse::new(
        200,
        json!({
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "company": "@github",
            "blog": "https://github.blog",
            "location": "San Francisco",
            "bio": null,
            "public_repos": 2,
            "followers": 17000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z",
        })
        .to_string(),
    )
}

fn octocat_repos() -> RawResponse {
    RawResponse::new(
        200,
        json!([
            {
                "id": 1296269,
                "name": "Hello-World",
                "description": "My first repository on GitHub!",
                "language": null,
                "stargazers_count": 2500,
                "watchers_count": 2500,
                "forks_count": 2000,
                "html_url": "https://github.com/octocat/Hello-World",
                "fork": false,
            },
            {
                "id": 18221276,
                "name": "git-consortium",
                "description": "This repo is for demonstration purposes only.",
                "language": null,
                "stargazers_count": 20,
                "watchers_count": 20,
                "forks_count": 40,
                "html_url": "https://github.com/octocat/git-consortium",
                "fork": false,
            }
        ])
        .to_string(),
    )
}

/// Answers by URL suffix and counts requests.
struct Scripted {
    user: Result<RawResponse, FetchError>,
    repos: Result<RawResponse, FetchError>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(user: Result<RawResponse, FetchError>, repos: Result<RawResponse, FetchError>) -> Self {
        Self {
            user,
            repos,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.ends_with("/repos") {
            self.repos.clone()
        } else {
            self.user.clone()
        }
    }
}

/// Neither request can finish until both have started.
struct BothInFlight {
    barrier: Barrier,
}

#[async_trait]
impl Transport for BothInFlight {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.barrier.wait().await;
        if url.ends_with("/repos") {
            Ok(octocat_repos())
        } else {
            Ok(octocat_profile())
        }
    }
}

#[tokio::test]
async fn test_requests_run_concurrently() {
    let transport = BothInFlight {
        barrier: Barrier::new(2),
    };

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        fetch_user_and_repos(&transport, BASE, "octocat"),
    )
    .await
    .expect("profile and repository requests were not in flight together");

    assert_eq!(result.unwrap().repos.len(), 2);
}

#[tokio::test]
async fn test_octocat_repo_count_matches_profile() {
    let transport = Scripted::new(Ok(octocat_profile()), Ok(octocat_repos()));

    let found = fetch_user_and_repos(&transport, BASE, "octocat").await.unwrap();

    assert_eq!(found.user.login.as_deref(), Some("octocat"));
    assert_eq!(found.user.public_repos as usize, found.repos.len());
    assert!(!found.is_not_found());
}

#[tokio::test]
async fn test_result_is_returned_unmodified() {
    let transport = Scripted::new(Ok(octocat_profile()), Ok(octocat_repos()));

    let found = fetch_user_and_repos(&transport, BASE, "octocat").await.unwrap();

    let names: Vec<_> = found.repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Hello-World", "git-consortium"]);
    assert_eq!(found.user.blog.as_deref(), Some("https://github.blog"));
    assert_eq!(found.user.bio, None);
}

#[tokio::test]
async fn test_repos_transport_failure_is_never_an_empty_list() {
    let repos_url = format!("{BASE}octocat/repos");
    let transport = Scripted::new(
        Ok(octocat_profile()),
        Err(FetchError::transport(&repos_url, None, "connection reset")),
    );

    let err = fetch_user_and_repos(&transport, BASE, "octocat")
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.url(), repos_url);
}

#[tokio::test]
async fn test_unknown_user_is_reported_in_payload() {
    let not_found = RawResponse::new(
        404,
        json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/users/users#get-a-user",
            "status": "404",
        })
        .to_string(),
    );
    let transport = Scripted::new(Ok(not_found.clone()), Ok(not_found));

    let found = fetch_user_and_repos(&transport, BASE, "no-such-user-xyz")
        .await
        .unwrap();

    assert!(found.is_not_found());
    assert_eq!(found.user.message.as_deref(), Some("Not Found"));
    assert!(found.repos.is_empty());
}

#[tokio::test]
async fn test_server_error_on_user_request() {
    let transport = Scripted::new(
        Ok(RawResponse::new(503, "")),
        Ok(octocat_repos()),
    );

    let err = fetch_user_and_repos(&transport, BASE, "octocat")
        .await
        .unwrap_err();

    match err {
        FetchError::Transport { status, url, .. } => {
            assert_eq!(status, Some(503));
            assert_eq!(url, format!("{BASE}octocat"));
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_lookup_fetches_again() {
    let transport = Arc::new(Scripted::new(Ok(octocat_profile()), Ok(octocat_repos())));
    let client = GithubClient::with_transport(BASE, transport.clone());

    client.user_and_repos("octocat").await.unwrap();
    client.user_and_repos("octocat").await.unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 4);
}
