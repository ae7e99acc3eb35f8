//! Notification messages.
//!
//! Every alert the router can raise is a variant of [`Notification`]. The
//! `Display` implementation renders the text handed to
//! [`crate::Notifier::notify`]; [`Notification::tag`] gives a stable label for
//! structured logs.

use crate::{BranchName, IssueNumber, PullRequestNumber, RepositoryName, UserLogin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<'a> {
    SensitiveChange {
        branch: &'a BranchName,
        repository: &'a RepositoryName,
        pusher: &'a UserLogin,
    },
    PullRequestOpened {
        number: PullRequestNumber,
        title: &'a str,
        repository: &'a RepositoryName,
    },
    PullRequestMerged {
        number: PullRequestNumber,
        repository: &'a RepositoryName,
    },
    IssueComment {
        issue: IssueNumber,
        repository: &'a RepositoryName,
        body: &'a str,
        author: &'a UserLogin,
    },
    AdvisoryPublished {
        repository: &'a RepositoryName,
        summary: &'a str,
    },
    VulnerabilityAlert {
        repository: &'a RepositoryName,
        package: &'a str,
    },
}

impl Notification<'_> {
    pub fn tag(&self) -> &'static str {
        match self {
            Notification::SensitiveChange { .. } => "sensitive_change",
            Notification::PullRequestOpened { .. } => "new_pull_request",
            Notification::PullRequestMerged { .. } => "pull_request_merged",
            Notification::IssueComment { .. } => "new_comment",
            Notification::AdvisoryPublished { .. } => "advisory_published",
            Notification::VulnerabilityAlert { .. } => "vulnerability_alert",
        }
    }
}

impl std::fmt::Display for Notification<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::SensitiveChange {
                branch,
                repository,
                pusher,
            } => write!(
                f,
                "🚨 Sensitive changes detected on branch {branch} in {repository} by {pusher}"
            ),
            Notification::PullRequestOpened {
                number,
                title,
                repository,
            } => write!(f, "📝 New PR #{number}: {title} in {repository}"),
            Notification::PullRequestMerged { number, repository } => {
                write!(f, "✅ PR #{number} merged in {repository}")
            }
            Notification::IssueComment {
                issue,
                repository,
                body,
                author,
            } => write!(
                f,
                "💬 New comment on issue #{issue} in {repository}: \"{body}\" by {author}"
            ),
            Notification::AdvisoryPublished {
                repository,
                summary,
            } => write!(f, "🚨 Security advisory published in {repository}: {summary}"),
            Notification::VulnerabilityAlert {
                repository,
                package,
            } => write!(f, "🔒 New vulnerability alert in {repository} for {package}"),
        }
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
