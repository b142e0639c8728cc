//! Diagnostics: structured warnings the bus can be configured to emit.
//!
//! The bus itself is silent by default. When a policy flag opts in (or a
//! caller misuses the API, e.g. unregisters an unknown subscriber), the bus
//! builds a [`Diagnostic`] and hands it to the injected [`Report`]
//! collaborator. Where that goes — stdout, a logger, a metrics pipeline — is
//! the collaborator's business, not the bus's.
//!
//! ## Contents
//! - [`Diagnostic`], [`DiagnosticKind`] diagnostic classification and metadata
//! - [`Report`] the collaborator seam
//! - [`LogWriter`] built-in printer, the default collaborator

mod diagnostic;
mod log;
mod sink;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use log::LogWriter;
pub use sink::Report;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{Diagnostic, DiagnosticKind, Report};

    /// Test collaborator that records every diagnostic it receives.
    #[derive(Default)]
    pub(crate) struct Recorder {
        seen: Mutex<Vec<Diagnostic>>,
    }

    impl Recorder {
        pub(crate) fn kinds(&self) -> Vec<DiagnosticKind> {
            self.seen.lock().unwrap().iter().map(|d| d.kind).collect()
        }

        pub(crate) fn take(&self) -> Vec<Diagnostic> {
            std::mem::take(&mut *self.seen.lock().unwrap())
        }
    }

    impl Report for Recorder {
        fn report(&self, diagnostic: &Diagnostic) {
            self.seen.lock().unwrap().push(diagnostic.clone());
        }
    }
}
