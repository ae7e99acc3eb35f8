//! The event router: classification rules and dispatch.
//!
//! Each handler runs a short ordered pipeline of awaited collaborator calls:
//! record the event, then notify and/or trigger. The first failing call ends
//! the handler; later steps are never attempted and the failure is returned to
//! the caller as a [`CollaboratorFailure`].
//!
//! | Event | Records | Notifies | Triggers pipeline |
//! |-------|---------|----------|-------------------|
//! | push | always | sensitive path added/modified | always |
//! | pull_request | always | `opened`, `reopened`, `closed` + merged | never |
//! | issue_comment | `created`[^policy] | `created` | never |
//! | security_advisory | `published`[^policy] | `published` | never |
//! | repository_vulnerability_alert | `created`[^policy] | `created` | never |
//!
//! [^policy]: Under [`LoggingPolicy::Always`] these events are recorded for
//! every action.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    Collaborator, CollaboratorFailure, EventEnvelope, EventLogger, IssueCommentEvent,
    LoggingPolicy, Notification, Notifier, PipelineRequest, PipelineTrigger, PullRequestEvent,
    PushEvent, RouterConfig, SecurityAdvisoryEvent, VulnerabilityAlertEvent, WebhookEvent,
};

/// Routes typed webhook events to their handlers.
///
/// Cheap to clone; clones share the same collaborators and configuration.
/// Holds no mutable state, so any number of events may be dispatched
/// concurrently.
#[derive(Clone)]
pub struct EventRouter {
    config: Arc<RouterConfig>,
    logger: Arc<dyn EventLogger>,
    notifier: Arc<dyn Notifier>,
    trigger: Arc<dyn PipelineTrigger>,
}

impl EventRouter {
    pub fn new(
        config: RouterConfig,
        logger: Arc<dyn EventLogger>,
        notifier: Arc<dyn Notifier>,
        trigger: Arc<dyn PipelineTrigger>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            logger,
            notifier,
            trigger,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Hands the envelope to the handler for its kind.
    pub async fn dispatch(&self, envelope: &EventEnvelope) -> Result<(), CollaboratorFailure> {
        match envelope {
            EventEnvelope::Push(e) => self.handle_push(e).await,
            EventEnvelope::PullRequest(e) => self.handle_pull_request(e).await,
            EventEnvelope::IssueComment(e) => self.handle_issue_comment(e).await,
            EventEnvelope::SecurityAdvisory(e) => self.handle_security_advisory(e).await,
            EventEnvelope::VulnerabilityAlert(e) => {
                self.handle_repository_vulnerability_alert(e).await
            }
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// Records the push, alerts on sensitive file changes, and always starts
    /// the pipeline for the pushed head commit.
    #[instrument(
        name = "handle_push",
        skip_all,
        fields(repository = %event.repository, branch = %event.branch, pusher = %event.pusher)
    )]
    pub async fn handle_push(&self, event: &PushEvent) -> Result<(), CollaboratorFailure> {
        self.record(event).await?;

        if self.config.sensitive_files.touched_by(&event.commits) {
            info!("Sensitive file change detected");
            self.notify::<PushEvent>(Notification::SensitiveChange {
                branch: &event.branch,
                repository: &event.repository,
                pusher: &event.pusher,
            })
            .await?;
        }

        let request = PipelineRequest {
            repository: event.repository.clone(),
            branch: event.branch.clone(),
            commit: event.head_commit.clone(),
            author: event.pusher.clone(),
        };
        self.trigger.trigger(&request).await.map_err(|e| {
            CollaboratorFailure::new(Collaborator::PipelineTrigger, PushEvent::KIND, e)
        })?;
        info!(commit = %request.commit, "Pipeline triggered");

        Ok(())
    }

    #[instrument(
        name = "handle_pull_request",
        skip_all,
        fields(repository = %event.repository, number = %event.number, action = %event.action)
    )]
    pub async fn handle_pull_request(
        &self,
        event: &PullRequestEvent,
    ) -> Result<(), CollaboratorFailure> {
        self.record(event).await?;

        let notification = match event.action.as_str() {
            "opened" | "reopened" => Some(Notification::PullRequestOpened {
                number: event.number,
                title: &event.title,
                repository: &event.repository,
            }),
            "closed" if event.merged => Some(Notification::PullRequestMerged {
                number: event.number,
                repository: &event.repository,
            }),
            "closed" => None,
            other => {
                debug!(action = other, "Unhandled pull request action");
                None
            }
        };

        if let Some(notification) = notification {
            self.notify::<PullRequestEvent>(notification).await?;
        }
        Ok(())
    }

    #[instrument(
        name = "handle_issue_comment",
        skip_all,
        fields(repository = %event.repository, issue = %event.issue, action = %event.action)
    )]
    pub async fn handle_issue_comment(
        &self,
        event: &IssueCommentEvent,
    ) -> Result<(), CollaboratorFailure> {
        let matched = event.action == "created";
        self.record_if(matched, event).await?;

        if matched {
            self.notify::<IssueCommentEvent>(Notification::IssueComment {
                issue: event.issue,
                repository: &event.repository,
                body: &event.body,
                author: &event.author,
            })
            .await?;
        }
        Ok(())
    }

    #[instrument(
        name = "handle_security_advisory",
        skip_all,
        fields(repository = %event.repository, action = %event.action)
    )]
    pub async fn handle_security_advisory(
        &self,
        event: &SecurityAdvisoryEvent,
    ) -> Result<(), CollaboratorFailure> {
        let matched = event.action == "published";
        self.record_if(matched, event).await?;

        if matched {
            self.notify::<SecurityAdvisoryEvent>(Notification::AdvisoryPublished {
                repository: &event.repository,
                summary: &event.summary,
            })
            .await?;
        }
        Ok(())
    }

    #[instrument(
        name = "handle_repository_vulnerability_alert",
        skip_all,
        fields(repository = %event.repository, action = %event.action)
    )]
    pub async fn handle_repository_vulnerability_alert(
        &self,
        event: &VulnerabilityAlertEvent,
    ) -> Result<(), CollaboratorFailure> {
        let matched = event.action == "created";
        self.record_if(matched, event).await?;

        if matched {
            self.notify::<VulnerabilityAlertEvent>(Notification::VulnerabilityAlert {
                repository: &event.repository,
                package: &event.package,
            })
            .await?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    async fn record<E: WebhookEvent>(&self, event: &E) -> Result<(), CollaboratorFailure> {
        self.logger
            .log_event(E::KIND, event.payload())
            .await
            .map_err(|e| CollaboratorFailure::new(Collaborator::Logger, E::KIND, e))?;
        debug!("Event recorded");
        Ok(())
    }

    /// Records an event from one of the action-gated handlers, honouring the
    /// configured [`LoggingPolicy`].
    async fn record_if<E: WebhookEvent>(
        &self,
        matched: bool,
        event: &E,
    ) -> Result<(), CollaboratorFailure> {
        match (matched, self.config.logging) {
            (true, _) | (false, LoggingPolicy::Always) => self.record(event).await,
            (false, LoggingPolicy::MatchedActionsOnly) => {
                debug!("Action not handled; event not recorded");
                Ok(())
            }
        }
    }

    async fn notify<E: WebhookEvent>(
        &self,
        notification: Notification<'_>,
    ) -> Result<(), CollaboratorFailure> {
        let message = notification.to_string();
        self.notifier
            .notify(&message)
            .await
            .map_err(|e| CollaboratorFailure::new(Collaborator::Notifier, E::KIND, e))?;
        info!(notification = notification.tag(), "Notification sent");
        Ok(())
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
