//! # Dispatch: routing, posters and the shared invocation path.
//!
//! `post` resolves the subscriptions for the event's exact type and routes
//! each one, in registration order, to the poster matching its delivery
//! mode:
//!
//! ```text
//! post(event)
//!   └─► Dispatcher::dispatch(key, event)
//!         ├─ snapshot(key) empty ─► optional NoSubscribers diagnostic
//!         └─ for each subscription (registration order):
//!              ├─ Sync  ─► SyncPoster  ─► Invoker::invoke (awaited inline)
//!              └─ Async ─► AsyncPoster ─► WorkerPool::submit(invoke job)
//! ```
//!
//! ## Invocation policy
//! [`Invoker::invoke`] is the single path both posters share:
//! - inactive subscriptions are skipped (unregister already happened);
//! - the handler future runs under `catch_unwind`, a panic becomes a
//!   [`HandlerError::Panic`];
//! - on failure the policy flags apply independently: log, then propagate.
//!
//! A propagated failure only means something on the sync path. The async
//! job drops it at the worker boundary: there is no caller left to receive
//! it, and the pool must keep running.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::core::config::Policy;
use crate::core::pool::WorkerPool;
use crate::core::registry::Registry;
use crate::core::subscription::Subscription;
use crate::error::{DispatchError, HandlerError};
use crate::events::{AnyEvent, EventKey};
use crate::handlers::DispatchMode;
use crate::report::{Diagnostic, DiagnosticKind, Report};

/// Shared invocation path: call the handler, apply the failure policy.
pub(crate) struct Invoker {
    policy: Arc<Policy>,
    report: Arc<dyn Report>,
}

impl Invoker {
    pub(crate) fn new(policy: Arc<Policy>, report: Arc<dyn Report>) -> Self {
        Self { policy, report }
    }

    pub(crate) async fn invoke(
        &self,
        subscription: &Subscription,
        event: AnyEvent,
    ) -> Result<(), DispatchError> {
        // A queued async delivery may outlive its registration; honor the
        // retired flag instead of executing stale work.
        if !subscription.is_active() {
            return Ok(());
        }

        let outcome = AssertUnwindSafe(subscription.handler().call(event))
            .catch_unwind()
            .await;
        let error = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(error)) => error,
            Err(panic) => HandlerError::Panic {
                info: panic_info(panic),
            },
        };

        if self.policy.log_handler_failures() {
            self.report.report(
                &Diagnostic::new(DiagnosticKind::HandlerFailed)
                    .with_event(subscription.event_key().name())
                    .with_subscriber(subscription.subscriber())
                    .with_handler(subscription.handler().name())
                    .with_error(error.to_string()),
            );
        }
        if self.policy.propagate_handler_failures() {
            return Err(DispatchError::Delivery {
                event: subscription.event_key().name(),
                subscriber: subscription.subscriber().to_string(),
                source: error,
            });
        }
        Ok(())
    }
}

fn panic_info(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

/// Delivery strategy for one subscription.
#[async_trait]
pub(crate) trait Poster: Send + Sync {
    /// Delivers one event to one subscription.
    async fn post(
        &self,
        subscription: Arc<Subscription>,
        event: AnyEvent,
    ) -> Result<(), DispatchError>;
}

/// Inline delivery: the caller waits for the handler to finish.
pub(crate) struct SyncPoster {
    invoker: Arc<Invoker>,
}

impl SyncPoster {
    pub(crate) fn new(invoker: Arc<Invoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl Poster for SyncPoster {
    async fn post(
        &self,
        subscription: Arc<Subscription>,
        event: AnyEvent,
    ) -> Result<(), DispatchError> {
        self.invoker.invoke(&subscription, event).await
    }
}

/// Pooled delivery: the invocation becomes a job on the shared worker pool.
pub(crate) struct AsyncPoster {
    invoker: Arc<Invoker>,
    pool: Arc<WorkerPool>,
}

impl AsyncPoster {
    pub(crate) fn new(invoker: Arc<Invoker>, pool: Arc<WorkerPool>) -> Self {
        Self { invoker, pool }
    }
}

#[async_trait]
impl Poster for AsyncPoster {
    async fn post(
        &self,
        subscription: Arc<Subscription>,
        event: AnyEvent,
    ) -> Result<(), DispatchError> {
        let invoker = Arc::clone(&self.invoker);
        self.pool.submit(Box::pin(async move {
            // No caller to propagate to; the policy already logged it.
            let _ = invoker.invoke(&subscription, event).await;
        }));
        Ok(())
    }
}

/// The `post` entry point: snapshot, then route per mode.
pub(crate) struct Dispatcher {
    registry: Arc<Registry>,
    policy: Arc<Policy>,
    report: Arc<dyn Report>,
    sync_poster: SyncPoster,
    async_poster: AsyncPoster,
}

impl Dispatcher {
    pub(crate) fn new(
        registry: Arc<Registry>,
        policy: Arc<Policy>,
        report: Arc<dyn Report>,
        invoker: Arc<Invoker>,
        pool: Arc<WorkerPool>,
    ) -> Self {
        Self {
            registry,
            policy,
            report,
            sync_poster: SyncPoster::new(Arc::clone(&invoker)),
            async_poster: AsyncPoster::new(invoker, pool),
        }
    }

    pub(crate) async fn dispatch(
        &self,
        key: EventKey,
        event: AnyEvent,
    ) -> Result<(), DispatchError> {
        let subscriptions = self.registry.snapshot(&key).await;
        if subscriptions.is_empty() {
            if self.policy.log_unhandled_events() {
                self.report
                    .report(&Diagnostic::new(DiagnosticKind::NoSubscribers).with_event(key.name()));
            }
            return Ok(());
        }

        for subscription in &subscriptions {
            // Exhaustive on purpose: a new mode must pick a poster here or
            // fail to compile, never fall through to a recoverable arm.
            let poster: &dyn Poster = match subscription.mode() {
                DispatchMode::Sync => &self.sync_poster,
                DispatchMode::Async => &self.async_poster,
            };
            poster
                .post(Arc::clone(subscription), Arc::clone(&event))
                .await?;
        }
        Ok(())
    }
}
