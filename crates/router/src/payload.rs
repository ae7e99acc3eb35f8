//! Webhook payload parsing.
//!
//! GitHub delivers each event as an untyped JSON body plus an `X-GitHub-Event`
//! header. [`parse_event`] decodes the body once into a JSON value, reads the
//! subset of GitHub's schema the router needs through private wire structs, and
//! produces an [`EventEnvelope`]. The decoded body travels with the typed event
//! so the audit trail records it unabridged.
//!
//! Unknown JSON fields are ignored. A missing required field is a
//! [`PayloadError::Malformed`].

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    BranchName, Commit, CommitSha, EventEnvelope, EventKind, IssueCommentEvent, IssueNumber,
    PayloadError, PullRequestEvent, PullRequestNumber, PushEvent, RepositoryName,
    SecurityAdvisoryEvent, UserLogin, VulnerabilityAlertEvent,
};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Parses a webhook body for the event named by `event_header`.
///
/// Returns [`PayloadError::UnsupportedEvent`] when the header names an event
/// the router has no handler for.
pub fn parse_event(event_header: &str, body: &[u8]) -> Result<EventEnvelope, PayloadError> {
    let kind = EventKind::from_header(event_header)
        .ok_or_else(|| PayloadError::UnsupportedEvent(event_header.to_string()))?;

    let payload: Value = serde_json::from_slice(body)
        .map_err(|source| PayloadError::Malformed { event: kind, source })?;

    let envelope = match kind {
        EventKind::Push => {
            EventEnvelope::Push(decode::<PushPayload>(kind, &payload)?.into_event(payload))
        }
        EventKind::PullRequest => EventEnvelope::PullRequest(
            decode::<PullRequestPayload>(kind, &payload)?.into_event(payload),
        ),
        EventKind::IssueComment => EventEnvelope::IssueComment(
            decode::<IssueCommentPayload>(kind, &payload)?.into_event(payload),
        ),
        EventKind::SecurityAdvisory => EventEnvelope::SecurityAdvisory(
            decode::<SecurityAdvisoryPayload>(kind, &payload)?.into_event(payload),
        ),
        EventKind::VulnerabilityAlert => EventEnvelope::VulnerabilityAlert(
            decode::<VulnerabilityAlertPayload>(kind, &payload)?.into_event(payload),
        ),
    };

    Ok(envelope)
}

/// Strips the `refs/heads/` prefix from a Git ref.
///
/// Refs that do not name a branch (tags, notes) are returned unchanged.
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(git_ref)
}

/// Deserialises a Git ref into the branch it names.
fn branch_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BranchName, D::Error> {
    let git_ref = String::deserialize(deserializer)?;
    BranchName::new(branch_from_ref(&git_ref))
        .ok_or_else(|| D::Error::custom(format!("ref '{git_ref}' names no branch")))
}

fn decode<T: DeserializeOwned>(event: EventKind, payload: &Value) -> Result<T, PayloadError> {
    T::deserialize(payload).map_err(|source| PayloadError::Malformed { event, source })
}

// ---------------------------------------------------------------------------
// Shared wire fragments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RepositoryWire {
    full_name: RepositoryName,
}

#[derive(Deserialize)]
struct UserWire {
    login: UserLogin,
}

#[derive(Deserialize)]
struct RefWire {
    #[serde(rename = "ref")]
    name: BranchName,
}

// ---------------------------------------------------------------------------
// push
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PushPayload {
    #[serde(rename = "ref", deserialize_with = "branch_name")]
    branch: BranchName,
    after: CommitSha,
    repository: RepositoryWire,
    pusher: PusherWire,
    commits: Vec<CommitWire>,
}

#[derive(Deserialize)]
struct PusherWire {
    name: UserLogin,
}

#[derive(Deserialize)]
struct CommitWire {
    added: Vec<String>,
    modified: Vec<String>,
}

impl PushPayload {
    fn into_event(self, payload: Value) -> PushEvent {
        PushEvent {
            branch: self.branch,
            repository: self.repository.full_name,
            pusher: self.pusher.name,
            head_commit: self.after,
            commits: self
                .commits
                .into_iter()
                .map(|c| Commit {
                    added: c.added,
                    modified: c.modified,
                })
                .collect(),
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// pull_request
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: PullRequestWire,
    repository: RepositoryWire,
}

#[derive(Deserialize)]
struct PullRequestWire {
    number: PullRequestNumber,
    title: String,
    base: RefWire,
    head: RefWire,
    user: UserWire,
    // Absent or null on some actions; only `true` counts as merged.
    #[serde(default)]
    merged: Option<bool>,
}

impl PullRequestPayload {
    fn into_event(self, payload: Value) -> PullRequestEvent {
        let pr = self.pull_request;
        PullRequestEvent {
            action: self.action,
            number: pr.number,
            title: pr.title,
            base_branch: pr.base.name,
            head_branch: pr.head.name,
            author: pr.user.login,
            repository: self.repository.full_name,
            merged: pr.merged.unwrap_or(false),
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// issue_comment
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IssueCommentPayload {
    action: String,
    issue: IssueWire,
    comment: CommentWire,
    repository: RepositoryWire,
}

#[derive(Deserialize)]
struct IssueWire {
    number: IssueNumber,
}

#[derive(Deserialize)]
struct CommentWire {
    body: String,
    user: UserWire,
}

impl IssueCommentPayload {
    fn into_event(self, payload: Value) -> IssueCommentEvent {
        IssueCommentEvent {
            action: self.action,
            issue: self.issue.number,
            repository: self.repository.full_name,
            body: self.comment.body,
            author: self.comment.user.login,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// security_advisory / repository_vulnerability_alert
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SecurityAdvisoryPayload {
    action: String,
    security_advisory: AdvisoryWire,
    repository: RepositoryWire,
}

#[derive(Deserialize)]
struct AdvisoryWire {
    summary: String,
}

impl SecurityAdvisoryPayload {
    fn into_event(self, payload: Value) -> SecurityAdvisoryEvent {
        SecurityAdvisoryEvent {
            action: self.action,
            repository: self.repository.full_name,
            summary: self.security_advisory.summary,
            payload,
        }
    }
}

#[derive(Deserialize)]
struct VulnerabilityAlertPayload {
    action: String,
    alert: AlertWire,
    repository: RepositoryWire,
}

#[derive(Deserialize)]
struct AlertWire {
    #[serde(alias = "affected_package_name")]
    package_name: String,
}

impl VulnerabilityAlertPayload {
    fn into_event(self, payload: Value) -> VulnerabilityAlertEvent {
        VulnerabilityAlertEvent {
            action: self.action,
            repository: self.repository.full_name,
            package: self.alert.package_name,
            payload,
        }
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
