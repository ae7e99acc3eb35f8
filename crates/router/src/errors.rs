//! Error types for the routing domain.
//!
//! [`CollaboratorFailure`] is the only error the router itself produces: it is
//! always caused by a collaborator (logger, notifier, pipeline trigger) and
//! wraps that collaborator's error unchanged.
//!
//! [`PayloadError`] is produced one step earlier, at the boundary, when an
//! incoming webhook body cannot be turned into an [`crate::EventEnvelope`].

use thiserror::Error;

use crate::EventKind;

/// Error type returned by collaborator port implementations.
///
/// Boxed so that each adapter keeps its own concrete error type; callers can
/// recover it with [`std::error::Error::downcast_ref`].
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Collaborator failures
// ---------------------------------------------------------------------------

/// The external collaborator a router step talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    /// [`crate::EventLogger`]
    Logger,
    /// [`crate::Notifier`]
    Notifier,
    /// [`crate::PipelineTrigger`]
    PipelineTrigger,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Collaborator::Logger => "event logger",
            Collaborator::Notifier => "notifier",
            Collaborator::PipelineTrigger => "pipeline trigger",
        })
    }
}

/// A collaborator call failed while handling an event.
///
/// The remaining steps of the handler were not attempted. No retry has been
/// made; the original error is available through [`std::error::Error::source`]
/// or [`CollaboratorFailure::into_source`].
#[derive(Debug, Error)]
#[error("{collaborator} failed while handling {event} event")]
pub struct CollaboratorFailure {
    /// Which collaborator failed.
    pub collaborator: Collaborator,
    /// The kind of event being handled.
    pub event: EventKind,
    /// The collaborator's own error, untouched.
    #[source]
    pub source: CollaboratorError,
}

impl CollaboratorFailure {
    pub fn new(collaborator: Collaborator, event: EventKind, source: CollaboratorError) -> Self {
        Self {
            collaborator,
            event,
            source,
        }
    }

    /// Consumes the failure and returns the collaborator's original error.
    pub fn into_source(self) -> CollaboratorError {
        self.source
    }
}

// ---------------------------------------------------------------------------
// Payload errors
// ---------------------------------------------------------------------------

/// An incoming webhook could not be parsed into an event envelope.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The `X-GitHub-Event` value names an event the router does not handle.
    ///
    /// Not a failure of the sender; boundaries usually acknowledge and ignore.
    #[error("Unsupported event type '{0}'")]
    UnsupportedEvent(String),

    /// The body is not valid JSON or lacks a field the event's rule needs.
    #[error("Malformed {event} payload: {source}")]
    Malformed {
        event: EventKind,
        #[source]
        source: serde_json::Error,
    },
}
