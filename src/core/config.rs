//! # Bus configuration.
//!
//! Provides [`BusConfig`] centralized settings for one bus instance, and the
//! crate-internal [`Policy`] that makes the diagnostic/propagation flags
//! adjustable on a shared bus (the original surface exposes setters, and a
//! bus handle is shared behind an `Arc`).
//!
//! ## Defaults
//! The bus is silent by default: both an event with zero subscribers and a
//! failing handler produce nothing unless explicitly opted into.

use std::sync::atomic::{AtomicBool, Ordering};

/// Configuration for one [`EventBus`](crate::EventBus) instance.
///
/// ## Field semantics
/// - `log_unhandled_events`: diagnostic when a posted event matches no
///   subscription (off by default)
/// - `log_handler_failures`: diagnostic when a handler fails, without
///   halting dispatch (off by default)
/// - `propagate_handler_failures`: surface a failing synchronous handler as
///   `post`'s error (off by default; on the async path there is no caller to
///   propagate to)
/// - `workers`: worker task count backing pooled deliveries (min 1; clamped)
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Report a `NoSubscribers` diagnostic for events nobody listens to.
    pub log_unhandled_events: bool,

    /// Report a `HandlerFailed` diagnostic when a handler fails.
    ///
    /// Applied independently of `propagate_handler_failures`; both may fire
    /// for the same failure.
    pub log_handler_failures: bool,

    /// Return a `DispatchError` from `post` when a synchronous handler fails.
    ///
    /// A failing async handler never reaches the `post` caller; its error is
    /// dropped at the worker boundary so the pool keeps running.
    pub propagate_handler_failures: bool,

    /// Number of worker tasks in the shared pool for async deliveries.
    ///
    /// The queue in front of the pool is unbounded: submission never blocks
    /// and never rejects, so a slow handler grows the queue instead of
    /// pushing back on posters.
    pub workers: usize,
}

impl BusConfig {
    /// Returns a worker count clamped to a minimum of 1.
    ///
    /// The builder uses this value so a zero in config cannot produce a
    /// pool that never drains its queue.
    #[inline]
    pub fn workers_clamped(&self) -> usize {
        self.workers.max(1)
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `log_unhandled_events = false` (silent)
    /// - `log_handler_failures = false` (silent)
    /// - `propagate_handler_failures = false` (`post` never errors)
    /// - `workers = 4`
    fn default() -> Self {
        Self {
            log_unhandled_events: false,
            log_handler_failures: false,
            propagate_handler_failures: false,
            workers: 4,
        }
    }
}

/// Runtime-adjustable policy flags, shared by the dispatcher and invoker.
#[derive(Debug)]
pub(crate) struct Policy {
    log_unhandled: AtomicBool,
    log_failures: AtomicBool,
    propagate_failures: AtomicBool,
}

impl Policy {
    pub(crate) fn from_config(cfg: &BusConfig) -> Self {
        Self {
            log_unhandled: AtomicBool::new(cfg.log_unhandled_events),
            log_failures: AtomicBool::new(cfg.log_handler_failures),
            propagate_failures: AtomicBool::new(cfg.propagate_handler_failures),
        }
    }

    pub(crate) fn log_unhandled_events(&self) -> bool {
        self.log_unhandled.load(Ordering::Relaxed)
    }

    pub(crate) fn log_handler_failures(&self) -> bool {
        self.log_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn propagate_handler_failures(&self) -> bool {
        self.propagate_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn set_log_unhandled_events(&self, enabled: bool) {
        self.log_unhandled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn set_log_handler_failures(&self, enabled: bool) {
        self.log_failures.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn set_propagate_handler_failures(&self, enabled: bool) {
        self.propagate_failures.store(enabled, Ordering::Relaxed);
    }
}
