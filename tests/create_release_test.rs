//! Integration tests for publishing releases.

mod common;

use std::time::Duration;

use common::*;
use provider_github::{CreateReleaseConfig, Provider, ProviderError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn release_config(version: &str) -> CreateReleaseConfig {
    CreateReleaseConfig {
        new_version: version.to_string(),
        sha: TEST_SHA.to_string(),
        ..Default::default()
    }
}

async fn mount_ref(server: &MockServer, tag: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(repo_path("/git/refs")))
        .and(body_json(json!({ "ref": format!("refs/tags/{}", tag), "sha": TEST_SHA })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_release_with_v_prefix() {
    let server = MockServer::start().await;
    mount_ref(&server, "v2.0.0", 1).await;

    Mock::given(method("POST"))
        .and(path(repo_path("/releases")))
        .and(body_json(json!({
            "tag_name": "v2.0.0",
            "name": "v2.0.0",
            "body": "",
            "prerelease": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let repo = mock_repository(&server, test_config());
    repo.create_release(&release_config("2.0.0")).await.unwrap();
}

#[tokio::test]
async fn test_create_release_strips_v_prefix() {
    let server = MockServer::start().await;
    mount_ref(&server, "2.0.0", 1).await;

    Mock::given(method("POST"))
        .and(path(repo_path("/releases")))
        .and(body_json(json!({
            "tag_name": "2.0.0",
            "name": "2.0.0",
            "body": "",
            "prerelease": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let repo = mock_repository(&server, test_config().with_strip_v_tag_prefix(true));
    repo.create_release(&release_config("2.0.0")).await.unwrap();
}

#[tokio::test]
async fn test_prerelease_version_marks_release() {
    let server = MockServer::start().await;
    mount_ref(&server, "v2.1.0-beta.1", 1).await;

    Mock::given(method("POST"))
        .and(path(repo_path("/releases")))
        .and(body_json(json!({
            "tag_name": "v2.1.0-beta.1",
            "name": "v2.1.0-beta.1",
            "body": "### Features\n- beta",
            "prerelease": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = release_config("2.1.0-beta.1");
    config.changelog = "### Features\n- beta".to_string();

    let repo = mock_repository(&server, test_config());
    repo.create_release(&config).await.unwrap();
}

#[tokio::test]
async fn test_branch_release_skips_tag_creation() {
    let server = MockServer::start().await;
    mount_ref(&server, "v1.0.0", 0).await;

    Mock::given(method("POST"))
        .and(path(repo_path("/releases")))
        .and(body_json(json!({
            "tag_name": "v1.0.0",
            "name": "v1.0.0",
            "target_commitish": "main",
            "body": "notes",
            "prerelease": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = CreateReleaseConfig {
        changelog: "notes".to_string(),
        new_version: "1.0.0".to_string(),
        prerelease: true,
        branch: "main".to_string(),
        sha: "main".to_string(),
    };

    let repo = mock_repository(&server, test_config());
    repo.create_release(&config).await.unwrap();
}

#[tokio::test]
async fn test_invalid_version_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let repo = mock_repository(&server, test_config());
    let err = repo
        .create_release(&release_config("not-a-version"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidVersion(v) if v == "not-a-version"));
}

#[tokio::test]
async fn test_existing_tag_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(repo_path("/git/refs")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Reference already exists",
            "documentation_url": "https://docs.github.com/rest/git/refs#create-a-reference"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(repo_path("/releases")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let repo = mock_repository(&server, test_config());
    let err = repo.create_release(&release_config("2.0.0")).await.unwrap_err();

    assert_eq!(err.status_code(), Some(422));
    let message = err.to_string();
    assert!(message.contains("create tag"));
    assert!(message.contains("422"));
    assert!(message.contains("Reference already exists"));
}

#[tokio::test]
async fn test_server_error_on_write_is_sent_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(repo_path("/git/refs")))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&server)
        .await;

    let repo = mock_repository(&server, test_config().with_retry(3, Duration::from_millis(1)));
    let err = repo.create_release(&release_config("2.0.0")).await.unwrap_err();

    assert_eq!(err.status_code(), Some(502));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
