//! Error types used by the typebus registry and dispatch paths.
//!
//! This module defines three main error enums:
//!
//! - [`RegisterError`] — errors raised while registering a subscriber.
//! - [`DispatchError`] — a delivery failure surfaced to the `post` caller.
//! - [`HandlerError`] — errors raised by individual handler invocations.
//!
//! All types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.
//!
//! ## Propagation rules
//! - Registration errors always surface to the caller; nothing is inserted.
//! - Handler failures are contained per subscription: they become a
//!   [`DispatchError`] only when failure propagation is enabled, and only on
//!   the synchronous path (an async delivery has no caller to propagate to).

use thiserror::Error;

/// # Errors produced while registering a subscriber.
///
/// The whole registration batch is validated before anything is inserted,
/// so an `Err` means the registry was left unchanged.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegisterError {
    /// The subscriber already holds a subscription with the same signature
    /// (handler name + event type), either from an earlier registration or
    /// earlier in the same batch.
    #[error("subscriber `{subscriber}` already registered handler `{signature}`")]
    Duplicate {
        /// Subscriber identity.
        subscriber: String,
        /// Composite handler signature, `handler_name(EventTypeName)`.
        signature: String,
    },

    /// The registration carried no handlers at all.
    #[error("subscriber `{subscriber}` registered no handlers")]
    Empty {
        /// Subscriber identity.
        subscriber: String,
    },
}

impl RegisterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use typebus::RegisterError;
    ///
    /// let err = RegisterError::Empty { subscriber: "worker".into() };
    /// assert_eq!(err.as_label(), "register_empty");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegisterError::Duplicate { .. } => "register_duplicate",
            RegisterError::Empty { .. } => "register_empty",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegisterError::Duplicate {
                subscriber,
                signature,
            } => format!("duplicate registration: {subscriber}#{signature}"),
            RegisterError::Empty { subscriber } => {
                format!("empty registration: {subscriber}")
            }
        }
    }
}

/// # A delivery failure surfaced to the `post` caller.
///
/// Only produced when `propagate_handler_failures` is enabled and a
/// synchronous handler fails; with the default configuration `post` never
/// returns an error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler failed while delivering an event.
    #[error("delivering `{event}` to `{subscriber}` failed: {source}")]
    Delivery {
        /// Type name of the posted event.
        event: &'static str,
        /// Subscriber identity whose handler failed.
        subscriber: String,
        /// The underlying handler failure.
        source: HandlerError,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::Delivery { .. } => "dispatch_delivery",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::Delivery {
                event,
                subscriber,
                source,
            } => format!("event={event} subscriber={subscriber} cause={source}"),
        }
    }
}

/// # Errors produced by a single handler invocation.
///
/// Disposition is governed entirely by the bus policy flags: failures are
/// logged and/or propagated, never fatal to the bus itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The handler panicked; the panic was caught at the invocation boundary.
    #[error("handler panicked: {info}")]
    Panic {
        /// Panic payload, when it was a string.
        info: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`] from any message.
    ///
    /// # Example
    /// ```
    /// use typebus::HandlerError;
    ///
    /// let err = HandlerError::fail("connection refused");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::Panic { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::Panic { info } => format!("panic: {info}"),
        }
    }
}
