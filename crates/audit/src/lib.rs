//! HookRelay event log infrastructure adapter.
//!
//! Implements the [`router::EventLogger`] trait by appending one JSON object
//! per event to a [JSON Lines](https://jsonlines.org) file:
//!
//! ```text
//! {"recorded_at":"2024-05-01T12:00:00Z","event":"push","payload":{...}}
//! ```
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File handling and record framing live here. The
//! [`router`] crate sees only [`router::EventLogger`].
//!
//! Appends from concurrently handled webhooks are serialised through an
//! internal lock so records never interleave. No retry is attempted; an I/O
//! failure is returned to the router, which aborts the handler.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use router::{CollaboratorError, EventKind, EventLogger, Timestamp};

/// Errors produced while appending to the event log.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to write event log '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialise event record")]
    Serialize(#[from] serde_json::Error),
}

/// One line of the event log.
#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    recorded_at: Timestamp,
    event: EventKind,
    payload: &'a serde_json::Value,
}

/// Append-only JSON Lines event log.
#[derive(Debug)]
pub struct JsonLinesEventLogger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesEventLogger {
    /// Creates a logger writing to `path`. The file (and its parent
    /// directories) are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record for `payload`.
    pub async fn append(
        &self,
        kind: EventKind,
        payload: &serde_json::Value,
    ) -> Result<(), AuditError> {
        let record = EventRecord {
            recorded_at: Timestamp::now(),
            event: kind,
            payload,
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        self.write_line(&line).await.map_err(|source| AuditError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), event = %kind, "Event appended to log");
        Ok(())
    }

    async fn write_line(&self, line: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line).await?;
        file.flush().await
    }
}

#[async_trait]
impl EventLogger for JsonLinesEventLogger {
    async fn log_event(
        &self,
        kind: EventKind,
        event: &serde_json::Value,
    ) -> Result<(), CollaboratorError> {
        self.append(kind, event).await.map_err(Into::into)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
