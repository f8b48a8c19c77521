//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::time::Duration;

use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use provider_github::{GitHubConfig, GitHubRepository};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const OWNER: &str = "owner";
pub const REPO: &str = "test-repo";
pub const TEST_SHA: &str = "deadbeef";

pub const AUTHOR_LOGIN: &str = "author-login";
pub const AUTHOR_NAME: &str = "author";
pub const AUTHOR_EMAIL: &str = "author@github.com";
pub const TIMESTAMP: &str = "2024-06-15T12:00:00Z";

/// Route prefix for the test repository.
pub fn repo_path(suffix: &str) -> String {
    format!("/repos/{}/{}{}", OWNER, REPO, suffix)
}

/// Helper to create an octocrab client pointing to a mock server.
pub fn mock_client(server: &MockServer) -> Octocrab {
    Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab")
}

/// Settings for the test repository with fast retries.
pub fn test_config() -> GitHubConfig {
    GitHubConfig::new(OWNER, REPO).with_retry(1, Duration::from_millis(1))
}

/// A provider bound to the mock server.
pub fn mock_repository(server: &MockServer, config: GitHubConfig) -> GitHubRepository {
    GitHubRepository::with_client(config, mock_client(server))
}

/// Create a commit object the way the commits and compare endpoints return it.
pub fn commit_json(sha: &str, message: &str) -> Value {
    let signature = json!({
        "name": AUTHOR_NAME,
        "email": AUTHOR_EMAIL,
        "date": TIMESTAMP
    });
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": signature.clone(),
            "committer": signature
        },
        "author": { "login": AUTHOR_LOGIN },
        "committer": { "login": AUTHOR_LOGIN }
    })
}

/// History used by the commit tests, newest first.
pub fn history() -> Vec<(&'static str, &'static str)> {
    vec![
        ("abcd", "feat(app): new new feature"),
        ("1111", "feat: to"),
        ("abcd", "feat(app): new feature"),
        ("dcba", "Fix: bug"),
        ("cdba", "Initial commit"),
        ("efcd", "chore: break\nBREAKING CHANGE: breaks everything"),
        ("2222", "feat: from"),
        ("beef", "fix: test"),
    ]
}

/// `history()[range]` as commit JSON objects.
pub fn history_json(range: std::ops::Range<usize>) -> Vec<Value> {
    history()[range]
        .iter()
        .map(|(sha, message)| commit_json(sha, message))
        .collect()
}

/// A tag reference pointing at an object of the given type.
pub fn ref_json(name: &str, sha: &str, kind: &str) -> Value {
    json!({
        "ref": name,
        "node_id": "REF_node",
        "url": format!("https://api.github.com/repos/owner/test-repo/git/{}", name),
        "object": {
            "sha": sha,
            "type": kind,
            "url": format!("https://api.github.com/repos/owner/test-repo/git/commits/{}", sha)
        }
    })
}

/// An annotated tag object.
pub fn annotated_tag_json(tag: &str, target_sha: &str, target_kind: &str) -> Value {
    json!({
        "tag": tag,
        "sha": "12345678",
        "message": format!("Release {}", tag),
        "object": { "sha": target_sha, "type": target_kind }
    })
}
