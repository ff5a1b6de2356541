//! Unit tests for the github_client crate.

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "test-owner";
const REPO: &str = "test-repo";
const TOKEN: &str = "ghp_test_token";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = create_token_client(TOKEN, &mock_server.uri()).unwrap();
    GitHubClient::new(octocrab)
}

fn github_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    }))
}

#[tokio::test]
async fn test_get_branch_sha_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/main")))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("x-github-api-version", GITHUB_API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "node_id": "MDM6UmVmcmVmcy9oZWFkcy9tYWlu",
            "object": {
                "type": "commit",
                "sha": "aa218f56b14c9653891f9e74264a383fa43fefbd"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_branch_sha(OWNER, REPO, "main").await;

    if let Err(e) = &result {
        eprintln!("get_branch_sha error: {e:?}");
    }
    assert_eq!(result.unwrap(), "aa218f56b14c9653891f9e74264a383fa43fefbd");
}

#[tokio::test]
async fn test_get_branch_sha_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/missing")))
        .respond_with(github_error(404, "Not Found"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_branch_sha(OWNER, REPO, "missing").await;

    match result {
        Err(Error::RefNotFound { branch, message }) => {
            assert_eq!(branch, "missing");
            assert_eq!(message, "Not Found");
        }
        other => panic!("Expected RefNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_branch_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .and(body_json(json!({
            "ref": "refs/heads/add-docs",
            "sha": "aa218f56"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/add-docs",
            "object": { "type": "commit", "sha": "aa218f56" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .create_branch(OWNER, REPO, "add-docs", "aa218f56")
        .await;

    assert_eq!(result.unwrap(), BranchCreation::Created);
}

#[tokio::test]
async fn test_create_branch_already_exists_is_reused() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .respond_with(github_error(422, "Reference already exists"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .create_branch(OWNER, REPO, "add-docs", "aa218f56")
        .await;

    assert_eq!(result.unwrap(), BranchCreation::AlreadyExists);
}

#[tokio::test]
async fn test_create_branch_other_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .respond_with(github_error(403, "Resource not accessible by personal access token"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .create_branch(OWNER, REPO, "add-docs", "aa218f56")
        .await;

    match result {
        Err(Error::BranchCreate { branch, message }) => {
            assert_eq!(branch, "add-docs");
            assert!(message.contains("Resource not accessible"));
        }
        other => panic!("Expected BranchCreate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_file_decodes_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/mkdocs.yml")))
        .and(query_param("ref", "add-docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "name": "mkdocs.yml",
            "path": "mkdocs.yml",
            "sha": "3d21ec53",
            "content": "c2l0ZV9uYW1lOiBEb2Nz\nCm5hdjogW10K\n"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let file = client
        .get_file(OWNER, REPO, "mkdocs.yml", "add-docs")
        .await
        .unwrap()
        .expect("file should exist");

    assert_eq!(file.sha, "3d21ec53");
    assert_eq!(file.as_text(), Some("site_name: Docs\nnav: []\n"));
}

#[tokio::test]
async fn test_get_file_missing_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/mkdocs.yml")))
        .respond_with(github_error(404, "Not Found"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_file(OWNER, REPO, "mkdocs.yml", "main").await;

    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_get_file_other_failure_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/mkdocs.yml")))
        .respond_with(github_error(403, "Bad credentials"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_file(OWNER, REPO, "mkdocs.yml", "main").await;

    match result {
        Err(Error::ApiError { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_file_sha_existing_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/docs/intro.md")))
        .and(query_param("ref", "add-docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "path": "docs/intro.md",
            "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3",
            "content": ""
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let sha = client
        .get_file_sha(OWNER, REPO, "docs/intro.md", "add-docs")
        .await
        .unwrap();

    assert_eq!(
        sha.as_deref(),
        Some("95b966ae1c166bd92f8ae7d1c313e738c731dfc3")
    );
}

#[tokio::test]
async fn test_get_file_sha_missing_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/images/a.txt")))
        .respond_with(github_error(404, "Not Found"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let sha = client
        .get_file_sha(OWNER, REPO, "images/a.txt", "b1")
        .await
        .unwrap();

    assert_eq!(sha, None);
}

#[tokio::test]
async fn test_put_file_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/images/a.txt")))
        .and(body_json(json!({
            "message": "Add files via edge function: images/a.txt",
            "content": "aGVsbG8=",
            "branch": "b1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "path": "images/a.txt", "sha": "blob123" },
            "commit": { "sha": "7638417db6d59f3c431d3e1f261cc637155684cd" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let commit = FileCommit {
        path: "images/a.txt".to_string(),
        content: "aGVsbG8=".to_string(),
        message: "Add files via edge function: images/a.txt".to_string(),
        branch: "b1".to_string(),
        sha: None,
    };

    let result = client.put_file(OWNER, REPO, &commit).await;

    assert_eq!(result.unwrap(), "7638417db6d59f3c431d3e1f261cc637155684cd");
}

#[tokio::test]
async fn test_put_file_update_sends_sha() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/mkdocs.yml")))
        .and(body_json(json!({
            "message": "Update",
            "content": "c2l0ZV9uYW1lOiBEb2Nz",
            "branch": "add-docs",
            "sha": "3d21ec53"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": { "path": "mkdocs.yml", "sha": "blob456" },
            "commit": { "sha": "commit456" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let commit = FileCommit {
        path: "mkdocs.yml".to_string(),
        content: "c2l0ZV9uYW1lOiBEb2Nz".to_string(),
        message: "Update".to_string(),
        branch: "add-docs".to_string(),
        sha: Some("3d21ec53".to_string()),
    };

    let result = client.put_file(OWNER, REPO, &commit).await;

    assert_eq!(result.unwrap(), "commit456");
}

#[tokio::test]
async fn test_put_file_conflict_reports_path_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/docs/intro.md")))
        .respond_with(github_error(409, "docs/intro.md does not match 3d21ec53"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let commit = FileCommit {
        path: "docs/intro.md".to_string(),
        content: "IyBJbnRybwo=".to_string(),
        message: "Add".to_string(),
        branch: "add-docs".to_string(),
        sha: Some("3d21ec53".to_string()),
    };

    let result = client.put_file(OWNER, REPO, &commit).await;

    match result {
        Err(Error::Commit { path, message }) => {
            assert_eq!(path, "docs/intro.md");
            assert_eq!(message, "docs/intro.md does not match 3d21ec53");
        }
        other => panic!("Expected Commit error, got {other:?}"),
    }
}

#[test]
fn test_create_token_client_rejects_invalid_base() {
    let result = create_token_client(TOKEN, "not a url");

    assert!(matches!(result, Err(Error::AuthError(_))));
}
