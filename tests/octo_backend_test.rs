//! Octocrab Backend Integration Tests
//!
//! Exercises the octocrab-delegating backend against a mock GitHub API
//! server, checking it stays byte-compatible with the REST backend.

mod common;

use common::{config_for, MockGithub, TEST_LOGIN};
use github_mcp::github::{BridgeBackend, NewRepo, OctoBackend};
use github_mcp::BridgeError;
use std::time::Duration;

#[tokio::test]
async fn test_authenticated_user() {
    let (addr, _handle) = MockGithub::new().start().await;
    let backend = OctoBackend::new(&config_for(addr)).unwrap();

    let user = backend.authenticated_user().await.unwrap();
    assert_eq!(user.login, TEST_LOGIN);
}

#[tokio::test]
async fn test_bad_token_maps_to_api_error() {
    let (addr, _handle) = MockGithub::new().start().await;
    let mut config = config_for(addr);
    config.github_token = Some("ghp_wrong".to_string());
    let backend = OctoBackend::new(&config).unwrap();

    let err = backend.authenticated_user().await.unwrap_err();
    match err {
        BridgeError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_repos() {
    let (addr, _handle) = MockGithub::new().start().await;
    let backend = OctoBackend::new(&config_for(addr)).unwrap();

    let repos = backend.list_repos().await.unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "demo");
    assert_eq!(repos[1].name, "tools");
    assert_eq!(repos[1].description, "");
}

#[tokio::test]
async fn test_create_repo() {
    let (addr, _handle) = MockGithub::new().start().await;
    let backend = OctoBackend::new(&config_for(addr)).unwrap();

    let repo = NewRepo::new("octo-made", None, Some(true)).unwrap();
    let created = backend.create_repo(repo).await.unwrap();

    assert_eq!(created.name, "octo-made");
    assert_eq!(created.url, "https://github.com/octocat/octo-made");
    assert!(created.private);
}

#[tokio::test]
async fn test_create_repo_conflict_maps_to_api_error() {
    let (addr, _handle) = MockGithub::new()
        .with_create_failure(422, "name already exists on this account")
        .start()
        .await;
    let backend = OctoBackend::new(&config_for(addr)).unwrap();

    let repo = NewRepo::new("demo", None, None).unwrap();
    let err = backend.create_repo(repo).await.unwrap_err();
    match err {
        BridgeError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "name already exists on this account");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_upstream_maps_to_timeout() {
    let (addr, _handle) = MockGithub::new()
        .with_user_delay(Duration::from_secs(3))
        .start()
        .await;
    let mut config = config_for(addr);
    config.timeout_secs = 1;
    let backend = OctoBackend::new(&config).unwrap();

    let err = backend.authenticated_user().await.unwrap_err();
    assert!(matches!(err, BridgeError::Timeout(1)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreadable_body_maps_to_parse_error() {
    let (addr, _handle) = MockGithub::new().with_broken_user().start().await;
    let backend = OctoBackend::new(&config_for(addr)).unwrap();

    let err = backend.authenticated_user().await.unwrap_err();
    assert!(matches!(err, BridgeError::Parse(_)), "got {:?}", err);
}
