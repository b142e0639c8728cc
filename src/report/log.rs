//! # LogWriter — simple diagnostic printer
//!
//! A minimal [`Report`] collaborator that prints incoming diagnostics.
//! It is the default when no collaborator is injected.
//!
//! ## Example output
//! ```text
//! [no-subscribers] event="demo::Unheard"
//! [handler-failed] event="demo::Boom" subscriber="pinger" handler="on_boom" err="handler failed: boom"
//! [unknown-subscriber] subscriber="ghost"
//! ```

use super::{Diagnostic, DiagnosticKind, Report};

/// Diagnostic printer collaborator.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Report for LogWriter {
    fn report(&self, d: &Diagnostic) {
        match d.kind {
            DiagnosticKind::NoSubscribers => {
                println!(
                    "[no-subscribers] event={:?}",
                    d.event.unwrap_or("unknown")
                );
            }
            DiagnosticKind::HandlerFailed => {
                eprintln!(
                    "[handler-failed] event={:?} subscriber={:?} handler={:?} err={:?}",
                    d.event.unwrap_or("unknown"),
                    d.subscriber.as_deref().unwrap_or("unknown"),
                    d.handler.as_deref().unwrap_or("unknown"),
                    d.error.as_deref().unwrap_or("unknown"),
                );
            }
            DiagnosticKind::UnknownSubscriber => {
                eprintln!(
                    "[unknown-subscriber] subscriber={:?}",
                    d.subscriber.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }
}
