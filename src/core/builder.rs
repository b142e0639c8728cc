//! Builder for constructing an [`EventBus`] with optional collaborators.

use std::sync::Arc;

use crate::core::config::{BusConfig, Policy};
use crate::core::dispatch::{Dispatcher, Invoker};
use crate::core::pool::WorkerPool;
use crate::core::registry::Registry;
use crate::core::EventBus;
use crate::report::{LogWriter, Report};

/// Builder for an [`EventBus`] instance.
///
/// Lets the composition root inject the worker pool (the original's
/// custom-executor construction path) and the diagnostic collaborator.
pub struct BusBuilder {
    cfg: BusConfig,
    report: Option<Arc<dyn Report>>,
    pool: Option<WorkerPool>,
}

impl BusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BusConfig) -> Self {
        Self {
            cfg,
            report: None,
            pool: None,
        }
    }

    /// Sets the diagnostic collaborator.
    ///
    /// Defaults to the built-in [`LogWriter`] printer.
    pub fn with_report(mut self, report: Arc<dyn Report>) -> Self {
        self.report = Some(report);
        self
    }

    /// Injects a pre-built worker pool for async deliveries.
    ///
    /// The bus owns the pool for its lifetime; there is no way to swap it on
    /// a live bus, because replacing it with deliveries outstanding would
    /// strand queued work. Drain it through [`EventBus::shutdown`].
    /// Defaults to `WorkerPool::new(cfg.workers_clamped())`.
    pub fn with_worker_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Builds and returns the bus instance.
    ///
    /// This consumes the builder and wires all components:
    /// - Registry for subscription bookkeeping
    /// - Shared invoker (failure policy) behind both posters
    /// - Worker pool backing the async poster
    ///
    /// Must be called from within a tokio runtime (the default pool spawns
    /// its workers immediately).
    pub fn build(self) -> Arc<EventBus> {
        let report: Arc<dyn Report> = self
            .report
            .unwrap_or_else(|| Arc::new(LogWriter::new()));
        let policy = Arc::new(Policy::from_config(&self.cfg));
        let pool = Arc::new(
            self.pool
                .unwrap_or_else(|| WorkerPool::new(self.cfg.workers_clamped())),
        );

        let registry = Arc::new(Registry::new());
        let invoker = Arc::new(Invoker::new(Arc::clone(&policy), Arc::clone(&report)));
        let dispatcher = Dispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&policy),
            Arc::clone(&report),
            invoker,
            Arc::clone(&pool),
        );

        Arc::new(EventBus::new_internal(
            registry, dispatcher, policy, report, pool,
        ))
    }
}
