//! GitHub adapter tests against a mock HTTP server.

use mockito::Matcher;
use std::sync::Arc;

use drover::adapters::github::{Credentials, GitHubClient, GitHubTracker};
use drover::domain::ports::ProjectTracker;
use drover::domain::DomainError;

fn client(server: &mockito::ServerGuard) -> GitHubClient {
    GitHubClient::with_base(Credentials::new("test-token"), server.url())
}

#[tokio::test]
async fn test_create_issue_posts_to_repo_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/acme/atlas/issues")
        .match_header("authorization", "Bearer test-token")
        .match_header("accept", "application/vnd.github+json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "Wire the API",
            "labels": ["Task"],
        })))
        .with_status(201)
        .with_body(r#"{"node_id": "I_abc123", "number": 42, "title": "Wire the API"}"#)
        .create_async()
        .await;

    let created = client(&server)
        .create_issue(
            "acme",
            "atlas",
            "Wire the API",
            Some("Hook up the client."),
            vec!["Task".to_string()],
            vec![],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.node_id, "I_abc123");
    assert_eq!(created.number, 42);
}

#[tokio::test]
async fn test_create_issue_surfaces_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/repos/acme/atlas/issues")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = client(&server)
        .create_issue("acme", "atlas", "Wire the API", None, vec![], vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::RemoteWrite(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_ensure_label_treats_conflict_as_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/acme/atlas/labels")
        .with_status(422)
        .with_body(r#"{"message": "Validation Failed"}"#)
        .create_async()
        .await;

    client(&server)
        .ensure_label("acme", "atlas", "Task", "7057FF", "Work item")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ensure_team_treats_conflict_as_success() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/orgs/acme/teams")
        .with_status(422)
        .create_async()
        .await;

    client(&server)
        .ensure_team("acme", "Platform", "Core team")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_comment_targets_issue_number() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/acme/atlas/issues/7/comments")
        .match_body(Matcher::Json(serde_json::json!({"body": "Blocked by #3"})))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    client(&server)
        .post_comment("acme", "atlas", 7, "Blocked by #3")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_issues_requests_all_states() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/acme/atlas/issues")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".to_string(), "all".to_string()),
            Matcher::UrlEncoded("per_page".to_string(), "100".to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"[{"number": 1, "title": "Wire the API", "state": "open"},
                {"number": 2, "title": "A fix", "state": "open",
                 "pull_request": {"url": "https://example.invalid/pr/2"}}]"#,
        )
        .create_async()
        .await;

    let issues = client(&server).list_issues("acme", "atlas").await.unwrap();
    mock.assert_async().await;
    assert_eq!(issues.len(), 2);
    assert!(issues[0].pull_request.is_none());
    assert!(issues[1].pull_request.is_some());
}

#[tokio::test]
async fn test_graphql_errors_become_remote_write_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(r#"{"data": null, "errors": [{"message": "Field does not exist"}]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .graphql("query { broken }", serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Field does not exist"));
}

#[tokio::test]
async fn test_tracker_creates_project_via_two_graphql_calls() {
    let mut server = mockito::Server::new_async().await;
    // First call resolves the org node id, second runs the mutation.
    let owner_mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("organization".to_string()))
        .with_status(200)
        .with_body(r#"{"data": {"organization": {"id": "O_org1"}}}"#)
        .create_async()
        .await;
    let create_mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("createProjectV2".to_string()))
        .with_status(200)
        .with_body(r#"{"data": {"createProjectV2": {"projectV2": {"id": "PVT_board1"}}}}"#)
        .create_async()
        .await;

    let tracker = GitHubTracker::new(Arc::new(client(&server)));
    let project_id = tracker.create_project("acme", "Atlas").await.unwrap();

    owner_mock.assert_async().await;
    create_mock.assert_async().await;
    assert_eq!(project_id, "PVT_board1");
}

#[tokio::test]
async fn test_tracker_rejects_malformed_project_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(r#"{"data": {"organization": {}}}"#)
        .create_async()
        .await;

    let tracker = GitHubTracker::new(Arc::new(client(&server)));
    let err = tracker.create_project("acme", "Atlas").await.unwrap_err();
    assert!(err.to_string().contains("organization.id"));
}

#[test]
fn test_credentials_from_env_rejects_missing_token() {
    std::env::remove_var("GITHUB_TOKEN");
    assert!(Credentials::from_env().is_err());
}
