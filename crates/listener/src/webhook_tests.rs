use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use tower::ServiceExt;

use router::{
    CollaboratorError, EventKind, EventLogger, Notifier, PipelineRequest, PipelineTrigger,
    RouterConfig,
};

use super::*;
use crate::build_router;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Collaborators {
    logged: Mutex<Vec<EventKind>>,
    notified: Mutex<Vec<String>>,
    triggered: Mutex<Vec<PipelineRequest>>,
    notifier_down: bool,
}

#[async_trait]
impl EventLogger for Collaborators {
    async fn log_event(&self, kind: EventKind, _event: &Value) -> Result<(), CollaboratorError> {
        self.logged.lock().unwrap().push(kind);
        Ok(())
    }
}

#[async_trait]
impl Notifier for Collaborators {
    async fn notify(&self, message: &str) -> Result<(), CollaboratorError> {
        if self.notifier_down {
            return Err("slack returned 500".into());
        }
        self.notified.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

#[async_trait]
impl PipelineTrigger for Collaborators {
    async fn trigger(&self, request: &PipelineRequest) -> Result<(), CollaboratorError> {
        self.triggered.lock().unwrap().push(request.clone());
        Ok(())
    }
}

fn app(collaborators: &Arc<Collaborators>) -> axum::Router {
    build_router(EventRouter::new(
        RouterConfig::default(),
        collaborators.clone(),
        collaborators.clone(),
        collaborators.clone(),
    ))
}

/// Send a webhook delivery via `oneshot` and return (status, parsed JSON body).
async fn deliver(
    app: axum::Router,
    event: Option<&str>,
    delivery: Option<&str>,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(event) = event {
        builder = builder.header(EVENT_HEADER, event);
    }
    if let Some(delivery) = delivery {
        builder = builder.header(DELIVERY_HEADER, delivery);
    }
    let response = app
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn push_body(added: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "ref": "refs/heads/main",
        "after": "abc123",
        "repository": { "full_name": "org/repo" },
        "pusher": { "name": "alice" },
        "commits": [{ "added": [added], "modified": [] }]
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_push_delivery_is_processed() {
    let collaborators = Arc::new(Collaborators::default());

    let (status, body) = deliver(
        app(&collaborators),
        Some("push"),
        Some("d-1"),
        push_body(".env"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processed");
    assert_eq!(body["delivery"], "d-1");
    assert_eq!(*collaborators.logged.lock().unwrap(), vec![EventKind::Push]);
    assert_eq!(collaborators.notified.lock().unwrap().len(), 1);
    assert_eq!(collaborators.triggered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_delivery_header_gets_generated_id() {
    let collaborators = Arc::new(Collaborators::default());

    let (status, body) = deliver(app(&collaborators), Some("push"), None, push_body("a.txt")).await;

    assert_eq!(status, StatusCode::OK);
    let delivery = body["delivery"].as_str().unwrap();
    assert!(Uuid::parse_str(delivery).is_ok(), "{delivery}");
}

#[tokio::test]
async fn test_missing_event_header_is_bad_request() {
    let collaborators = Arc::new(Collaborators::default());

    let (status, body) = deliver(app(&collaborators), None, None, push_body(".env")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("X-GitHub-Event"));
    assert!(collaborators.logged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_event_is_acknowledged_and_ignored() {
    let collaborators = Arc::new(Collaborators::default());

    let (status, body) = deliver(
        app(&collaborators),
        Some("ping"),
        Some("d-2"),
        br#"{"zen":"Keep it logically awesome."}"#.to_vec(),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["event"], "ping");
    assert!(collaborators.logged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_payload_is_rejected_before_dispatch() {
    let collaborators = Arc::new(Collaborators::default());

    let (status, body) = deliver(
        app(&collaborators),
        Some("pull_request"),
        None,
        br#"{"action":"opened"}"#.to_vec(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pull_request"));
    assert!(collaborators.logged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_collaborator_failure_is_server_error() {
    let collaborators = Arc::new(Collaborators {
        notifier_down: true,
        ..Collaborators::default()
    });

    let (status, body) = deliver(
        app(&collaborators),
        Some("push"),
        None,
        push_body("secrets.yaml"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "notifier failed while handling push event"
    );
    assert_eq!(collaborators.logged.lock().unwrap().len(), 1);
    assert!(collaborators.triggered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let collaborators = Arc::new(Collaborators::default());
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = app(&collaborators).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
