//! Event routing domain for HookRelay.
//!
//! This crate turns GitHub webhook deliveries into typed events and decides,
//! per event kind and action, whether to record the event, send a
//! notification, or trigger the downstream build pipeline. Infrastructure
//! crates implement the collaborator traits defined here; they never add
//! routing rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryName`, `BranchName`, etc.) |
//! | [`types`] | Shared value types (`Timestamp`) |
//! | [`events`] | Typed events and the `EventEnvelope` union |
//! | [`payload`] | Webhook body parsing into `EventEnvelope` |
//! | [`config`] | `RouterConfig`, `SensitiveFileSet`, `LoggingPolicy` |
//! | [`ports`] | `EventLogger`, `Notifier`, `PipelineTrigger` traits |
//! | [`notification`] | Notification messages |
//! | [`router`] | `EventRouter` handlers and dispatch |
//! | [`errors`] | `CollaboratorFailure` and `PayloadError` |

pub mod config;
pub mod errors;
pub mod events;
pub mod identifiers;
pub mod notification;
pub mod payload;
pub mod ports;
pub mod router;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{LoggingPolicy, RouterConfig, SensitiveFileSet, DEFAULT_SENSITIVE_FILES};
pub use errors::{Collaborator, CollaboratorError, CollaboratorFailure, PayloadError};
pub use events::{
    Commit, EventEnvelope, EventKind, IssueCommentEvent, PullRequestEvent, PushEvent,
    SecurityAdvisoryEvent, VulnerabilityAlertEvent, WebhookEvent,
};
pub use identifiers::{
    BranchName, CommitSha, EmptyIdentifier, IssueNumber, PullRequestNumber, RepositoryName,
    UserLogin,
};
pub use notification::Notification;
pub use payload::parse_event;
pub use ports::{EventLogger, Notifier, PipelineRequest, PipelineTrigger};
pub use router::EventRouter;
pub use types::Timestamp;
