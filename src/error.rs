//! Error types used by the bus and its listeners.
//!
//! This module defines two error types:
//!
//! - [`ListenerError`] — an error returned by a listener callback.
//! - [`PublishError`] — an error returned by `publish`, wrapping the failing
//!   listener's error together with the event kind that was being delivered.
//!
//! Both types provide `as_label` helpers for logging/metrics.
//!
//! ## Failure semantics
//! A listener returning `Err` aborts the remainder of the dispatch pass:
//! listeners not yet invoked in the same `publish` call are skipped and the
//! error propagates to the `publish` caller as [`PublishError::Listener`].
//! Callers that prefer isolation can log the error and continue publishing.

use thiserror::Error;

use crate::events::EventKind;

/// # Error returned by a listener callback.
///
/// Carries a human-readable message describing why the listener failed.
/// Constructed by listener code, typically via `From<&str>` / `From<String>`
/// or [`ListenerError::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Creates a listener error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "listener_failed"
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// # Errors produced by the dispatch engine.
///
/// These represent failures during event delivery, not failures of the bus
/// itself: the registry walk is infallible, so the only way a `publish` call
/// can fail is a listener callback returning `Err`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PublishError {
    /// A listener failed while handling the event; remaining listeners of the
    /// same publish call were not invoked.
    #[error("listener for \"{kind}\" failed: {source}")]
    Listener {
        /// The event kind that was being delivered.
        kind: EventKind,
        /// The listener's own error.
        #[source]
        source: ListenerError,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Listener { .. } => "publish_listener_failed",
        }
    }

    /// Returns the event kind the failure occurred on.
    pub fn kind(&self) -> &EventKind {
        match self {
            PublishError::Listener { kind, .. } => kind,
        }
    }
}
