//! # Diagnostic collaborator trait.
//!
//! Provides [`Report`] an extension point for plugging a logger, metrics
//! exporter or test recorder into the bus.
//!
//! ## Rules
//! - Called from the posting task (sync path, unregister warnings) and from
//!   pool workers (async path), so implementations must be cheap and must
//!   not block.
//! - Handle errors internally; do not panic.
//!
//! ## Example
//! ```rust
//! use typebus::{Diagnostic, Report};
//!
//! struct Counter(std::sync::atomic::AtomicU64);
//!
//! impl Report for Counter {
//!     fn report(&self, _diagnostic: &Diagnostic) {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!     }
//! }
//! ```

use super::Diagnostic;

/// Receiver for bus diagnostics.
///
/// The default collaborator is [`LogWriter`](crate::LogWriter); inject your
/// own via [`BusBuilder::with_report`](crate::BusBuilder::with_report).
pub trait Report: Send + Sync + 'static {
    /// Consumes one diagnostic.
    ///
    /// May be called concurrently from the posting task and pool workers.
    fn report(&self, diagnostic: &Diagnostic);
}
