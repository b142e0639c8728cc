//! # Diagnostics emitted by the bus.
//!
//! The [`DiagnosticKind`] enum classifies what happened; the [`Diagnostic`]
//! struct carries the metadata that was available at the point of emission
//! (event type name, subscriber, handler, cause).
//!
//! ## Example
//! ```rust
//! use typebus::{Diagnostic, DiagnosticKind};
//!
//! let d = Diagnostic::new(DiagnosticKind::HandlerFailed)
//!     .with_event("demo::Ping")
//!     .with_subscriber("pinger")
//!     .with_error("boom");
//!
//! assert_eq!(d.kind, DiagnosticKind::HandlerFailed);
//! assert_eq!(d.subscriber.as_deref(), Some("pinger"));
//! ```

/// Classification of bus diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An event was posted and no subscription matched its type.
    ///
    /// Sets:
    /// - `event`: posted event type name
    ///
    /// Emitted only when `log_unhandled_events` is enabled.
    NoSubscribers,

    /// A handler failed (returned an error or panicked) during delivery.
    ///
    /// Sets:
    /// - `event`: posted event type name
    /// - `subscriber`: owning subscriber identity
    /// - `handler`: failing handler name
    /// - `error`: failure description
    ///
    /// Emitted only when `log_handler_failures` is enabled.
    HandlerFailed,

    /// `unregister` was called for a subscriber with no active registrations.
    ///
    /// Sets:
    /// - `subscriber`: the unknown identity
    ///
    /// Always emitted; the unregister call itself still succeeds.
    UnknownSubscriber,
}

/// One diagnostic with whatever metadata applies to its kind.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// What happened.
    pub kind: DiagnosticKind,
    /// Posted event type name, when relevant.
    pub event: Option<&'static str>,
    /// Subscriber identity, when relevant.
    pub subscriber: Option<String>,
    /// Handler name, when relevant.
    pub handler: Option<String>,
    /// Failure description, when relevant.
    pub error: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic of the given kind with no metadata.
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            event: None,
            subscriber: None,
            handler: None,
            error: None,
        }
    }

    /// Attaches the event type name.
    pub fn with_event(mut self, event: &'static str) -> Self {
        self.event = Some(event);
        self
    }

    /// Attaches the subscriber identity.
    pub fn with_subscriber(mut self, subscriber: impl Into<String>) -> Self {
        self.subscriber = Some(subscriber.into());
        self
    }

    /// Attaches the handler name.
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Attaches the failure description.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
