use router::{BranchName, CommitSha, RepositoryName, UserLogin};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::*;

fn request() -> PipelineRequest {
    PipelineRequest {
        repository: RepositoryName::new("org/repo").unwrap(),
        branch: BranchName::new("main").unwrap(),
        commit: CommitSha::new("abc123").unwrap(),
        author: UserLogin::new("alice").unwrap(),
    }
}

#[tokio::test]
async fn test_trigger_posts_request_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pipelines/trigger"))
        .and(body_json(json!({
            "repository": "org/repo",
            "branch": "main",
            "commit": "abc123",
            "author": "alice"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let trigger = HttpPipelineTrigger::new(format!("{}/pipelines/trigger", server.uri()));

    trigger.trigger(&request()).await.unwrap();
}

#[tokio::test]
async fn test_trigger_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    HttpPipelineTrigger::new(server.uri())
        .with_token("s3cret")
        .send(&request())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_trigger_without_token_sends_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    HttpPipelineTrigger::new(server.uri())
        .send(&request())
        .await
        .unwrap();

    let received: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_server_error_is_rejected_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("runner pool exhausted"))
        .mount(&server)
        .await;

    let err = HttpPipelineTrigger::new(server.uri())
        .send(&request())
        .await
        .unwrap_err();

    match err {
        CicdError::Rejected { status, body } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "runner pool exhausted");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_debug_output_redacts_token() {
    let trigger = HttpPipelineTrigger::new("http://ci.local/trigger").with_token("s3cret");

    let debug = format!("{trigger:?}");

    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("<redacted>"));
}
