//! Typed webhook events.
//!
//! Each supported GitHub event kind has one struct carrying the fields its
//! classification rule needs, plus the untouched webhook body for the audit
//! trail. [`EventEnvelope`] is the tagged union over them; it is built once at
//! the boundary by [`crate::payload::parse_event`] and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::{BranchName, CommitSha, IssueNumber, PullRequestNumber, RepositoryName, UserLogin};

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The event categories the router handles.
///
/// The serialised form matches the value GitHub sends in the `X-GitHub-Event`
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Push,
    PullRequest,
    IssueComment,
    SecurityAdvisory,
    #[serde(rename = "repository_vulnerability_alert")]
    VulnerabilityAlert,
}

impl EventKind {
    /// All kinds, in dispatch-table order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Push,
        EventKind::PullRequest,
        EventKind::IssueComment,
        EventKind::SecurityAdvisory,
        EventKind::VulnerabilityAlert,
    ];

    /// Returns the `X-GitHub-Event` header value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::IssueComment => "issue_comment",
            EventKind::SecurityAdvisory => "security_advisory",
            EventKind::VulnerabilityAlert => "repository_vulnerability_alert",
        }
    }

    /// Maps an `X-GitHub-Event` header value to a kind.
    ///
    /// Returns `None` for event types the router does not handle (e.g. `ping`).
    pub fn from_header(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every typed event so collaborators can be told what they
/// are recording.
pub trait WebhookEvent: Send + Sync {
    /// The kind this event type belongs to.
    const KIND: EventKind;

    /// The webhook body exactly as GitHub delivered it.
    fn payload(&self) -> &serde_json::Value;
}

// ---------------------------------------------------------------------------
// Push
// ---------------------------------------------------------------------------

/// Paths touched by one commit of a push.
///
/// Removed paths are not tracked; deleting a sensitive file does not count as
/// a sensitive change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub added: Vec<String>,
    pub modified: Vec<String>,
}

impl Commit {
    /// Iterates over every added and modified path, added paths first.
    pub fn changed_paths(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(String::as_str)
    }
}

/// A push to a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    pub branch: BranchName,
    pub repository: RepositoryName,
    pub pusher: UserLogin,
    /// SHA of the commit the branch points to after the push.
    pub head_commit: CommitSha,
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WebhookEvent for PushEvent {
    const KIND: EventKind = EventKind::Push;

    fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

// ---------------------------------------------------------------------------
// Pull request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: PullRequestNumber,
    pub title: String,
    pub base_branch: BranchName,
    pub head_branch: BranchName,
    pub author: UserLogin,
    pub repository: RepositoryName,
    pub merged: bool,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WebhookEvent for PullRequestEvent {
    const KIND: EventKind = EventKind::PullRequest;

    fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

// ---------------------------------------------------------------------------
// Issue comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue: IssueNumber,
    pub repository: RepositoryName,
    pub body: String,
    pub author: UserLogin,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WebhookEvent for IssueCommentEvent {
    const KIND: EventKind = EventKind::IssueComment;

    fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

// ---------------------------------------------------------------------------
// Security advisory / vulnerability alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAdvisoryEvent {
    pub action: String,
    pub repository: RepositoryName,
    pub summary: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WebhookEvent for SecurityAdvisoryEvent {
    const KIND: EventKind = EventKind::SecurityAdvisory;

    fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityAlertEvent {
    pub action: String,
    pub repository: RepositoryName,
    pub package: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl WebhookEvent for VulnerabilityAlertEvent {
    const KIND: EventKind = EventKind::VulnerabilityAlert;

    fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// One parsed webhook delivery, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "event", rename_all = "snake_case")]
pub enum EventEnvelope {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
    IssueComment(IssueCommentEvent),
    SecurityAdvisory(SecurityAdvisoryEvent),
    #[serde(rename = "repository_vulnerability_alert")]
    VulnerabilityAlert(VulnerabilityAlertEvent),
}

impl EventEnvelope {
    /// Returns the kind of the wrapped event.
    pub fn kind(&self) -> EventKind {
        match self {
            EventEnvelope::Push(_) => EventKind::Push,
            EventEnvelope::PullRequest(_) => EventKind::PullRequest,
            EventEnvelope::IssueComment(_) => EventKind::IssueComment,
            EventEnvelope::SecurityAdvisory(_) => EventKind::SecurityAdvisory,
            EventEnvelope::VulnerabilityAlert(_) => EventKind::VulnerabilityAlert,
        }
    }

    /// Returns the repository the event belongs to.
    pub fn repository(&self) -> &RepositoryName {
        match self {
            EventEnvelope::Push(e) => &e.repository,
            EventEnvelope::PullRequest(e) => &e.repository,
            EventEnvelope::IssueComment(e) => &e.repository,
            EventEnvelope::SecurityAdvisory(e) => &e.repository,
            EventEnvelope::VulnerabilityAlert(e) => &e.repository,
        }
    }
}
