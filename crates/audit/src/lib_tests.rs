use serde_json::json;
use tempfile::TempDir;

use super::*;

fn read_records(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_log_event_appends_one_line_per_event() {
    let dir = TempDir::new().unwrap();
    let logger = JsonLinesEventLogger::new(dir.path().join("events.jsonl"));

    logger
        .log_event(EventKind::Push, &json!({ "repository": "org/repo" }))
        .await
        .unwrap();
    logger
        .log_event(EventKind::IssueComment, &json!({ "body": "hi" }))
        .await
        .unwrap();

    let records = read_records(logger.path());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["event"], "push");
    assert_eq!(records[0]["payload"]["repository"], "org/repo");
    assert_eq!(records[1]["event"], "issue_comment");
    assert!(records[1]["recorded_at"].is_string());
}

#[tokio::test]
async fn test_log_event_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/audit/events.jsonl");
    let logger = JsonLinesEventLogger::new(&path);

    logger
        .log_event(EventKind::VulnerabilityAlert, &json!({}))
        .await
        .unwrap();

    let records = read_records(&path);
    assert_eq!(records[0]["event"], "repository_vulnerability_alert");
}

#[tokio::test]
async fn test_log_event_keeps_existing_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.jsonl");
    std::fs::write(&path, "{\"event\":\"push\"}\n").unwrap();

    JsonLinesEventLogger::new(&path)
        .log_event(EventKind::PullRequest, &json!({ "number": 1 }))
        .await
        .unwrap();

    assert_eq!(read_records(&path).len(), 2);
}

#[tokio::test]
async fn test_concurrent_appends_do_not_interleave() {
    let dir = TempDir::new().unwrap();
    let logger = std::sync::Arc::new(JsonLinesEventLogger::new(dir.path().join("events.jsonl")));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let logger = logger.clone();
            tokio::spawn(async move {
                logger
                    .log_event(EventKind::Push, &json!({ "n": i, "padding": "x".repeat(512) }))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(read_records(logger.path()).len(), 16);
}

#[tokio::test]
async fn test_unwritable_path_returns_io_error() {
    let dir = TempDir::new().unwrap();
    // The log path is an existing directory, which cannot be opened for appending.
    let logger = JsonLinesEventLogger::new(dir.path());

    let err = logger.append(EventKind::Push, &json!({})).await.unwrap_err();

    assert!(matches!(err, AuditError::Io { .. }), "{err:?}");
}
