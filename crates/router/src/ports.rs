//! Collaborator port definitions.
//!
//! The router reaches the outside world only through these three traits.
//! Infrastructure crates (`audit`, `slack`, `cicd`) implement them; tests
//! implement them with recording fakes.
//!
//! All traits are dyn-compatible via [`async_trait`] so the router can hold
//! them as `Arc<dyn …>` and be shared across concurrently handled webhooks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{BranchName, CollaboratorError, CommitSha, EventKind, RepositoryName, UserLogin};

/// Records every event the router decides to keep an audit trail for.
#[async_trait]
pub trait EventLogger: Send + Sync {
    /// Record one event.
    ///
    /// `event` is the webhook body exactly as GitHub delivered it, including
    /// fields the router never reads.
    async fn log_event(
        &self,
        kind: EventKind,
        event: &serde_json::Value,
    ) -> Result<(), CollaboratorError>;
}

/// Delivers a human-readable alert to an operational channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), CollaboratorError>;
}

/// Starts a downstream build/deploy for a pushed commit.
#[async_trait]
pub trait PipelineTrigger: Send + Sync {
    async fn trigger(&self, request: &PipelineRequest) -> Result<(), CollaboratorError>;
}

/// Parameters sent to the [`PipelineTrigger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub repository: RepositoryName,
    pub branch: BranchName,
    pub commit: CommitSha,
    pub author: UserLogin,
}
