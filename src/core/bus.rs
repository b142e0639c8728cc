//! # EventBus facade: register, unregister, post.
//!
//! [`EventBus`] composes the registry, the dispatcher with its two posters,
//! the worker pool and the failure policy behind the three-call surface the
//! rest of an application sees.
//!
//! ## Obtaining a bus
//! - [`EventBus::new`] — defaults, explicit instance owned by your
//!   composition root (preferred).
//! - [`EventBus::builder`] — custom config, injected pool or collaborator.
//! - [`EventBus::global`] — process-wide lazy default for code with no
//!   composition root to hang an instance on.
//!
//! ## Delivery semantics
//! - `post` awaits every matching **Sync** subscription inline, in
//!   registration order; a slow sync handler delays everything after it.
//! - **Async** subscriptions are queued on the shared pool; `post` never
//!   waits for them, and two async deliveries may complete in any order,
//!   even for the same event.
//! - Unregistering prevents future snapshots from returning the removed
//!   subscriptions and retires them, so queued-but-not-yet-run async work
//!   is skipped rather than executed.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use crate::core::builder::BusBuilder;
use crate::core::config::{BusConfig, Policy};
use crate::core::dispatch::Dispatcher;
use crate::core::pool::WorkerPool;
use crate::core::registry::Registry;
use crate::core::subscription::Subscription;
use crate::error::{DispatchError, RegisterError};
use crate::events::EventKey;
use crate::handlers::HandlerSpec;
use crate::report::{Diagnostic, DiagnosticKind, Report};

static GLOBAL: OnceLock<Arc<EventBus>> = OnceLock::new();

/// Central publish/subscribe bus.
///
/// Cheap to share: hold it behind the `Arc` the builder returns and clone
/// that handle freely across tasks.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use typebus::{EventBus, HandlerError, HandlerFn, HandlerSpec};
///
/// struct Ping;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bus = EventBus::new();
///
///     let hits = Arc::new(AtomicU32::new(0));
///     let seen = Arc::clone(&hits);
///     bus.register(
///         "pinger",
///         vec![HandlerSpec::sync(HandlerFn::arc("on_ping", move |_ev: Arc<Ping>| {
///             let seen = Arc::clone(&seen);
///             async move {
///                 seen.fetch_add(1, Ordering::SeqCst);
///                 Ok::<_, HandlerError>(())
///             }
///         }))],
///     )
///     .await?;
///
///     bus.post(Ping).await?;
///     assert_eq!(hits.load(Ordering::SeqCst), 1);
///     Ok(())
/// }
/// ```
pub struct EventBus {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    policy: Arc<Policy>,
    report: Arc<dyn Report>,
    pool: Arc<WorkerPool>,
}

impl EventBus {
    /// Returns a builder for a bus with the given configuration.
    pub fn builder(cfg: BusConfig) -> BusBuilder {
        BusBuilder::new(cfg)
    }

    /// Creates a bus with default configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Arc<Self> {
        Self::builder(BusConfig::default()).build()
    }

    /// Returns the process-wide default bus, created on first use.
    ///
    /// The first call must happen inside a tokio runtime; every later call
    /// returns the same instance regardless of context.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(EventBus::new))
    }

    pub(crate) fn new_internal(
        registry: Arc<Registry>,
        dispatcher: Dispatcher,
        policy: Arc<Policy>,
        report: Arc<dyn Report>,
        pool: Arc<WorkerPool>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            policy,
            report,
            pool,
        }
    }

    /// Registers a subscriber's handlers.
    ///
    /// The whole batch is applied atomically: a concurrent `post` sees
    /// either none of it or all of it, and on `Err` nothing was inserted.
    /// Each handler receives every subsequently posted event whose exact
    /// type matches its declaration, until [`unregister`](EventBus::unregister).
    pub async fn register(
        &self,
        subscriber: impl AsRef<str>,
        handlers: Vec<HandlerSpec>,
    ) -> Result<(), RegisterError> {
        self.registry.register(subscriber.as_ref(), handlers).await
    }

    /// Removes every subscription the subscriber holds.
    ///
    /// Never fails: unregistering an unknown subscriber reports an
    /// `UnknownSubscriber` diagnostic and returns normally. Async deliveries
    /// already queued for the subscriber are skipped when their worker gets
    /// to them (the subscriptions are retired first).
    pub async fn unregister(&self, subscriber: impl AsRef<str>) {
        let subscriber = subscriber.as_ref();
        if !self.registry.unregister(subscriber).await {
            self.report.report(
                &Diagnostic::new(DiagnosticKind::UnknownSubscriber).with_subscriber(subscriber),
            );
        }
    }

    /// Posts an event to every subscription matching its exact type.
    ///
    /// Returns after all sync deliveries completed; async deliveries are
    /// queued and complete later. `Err` is only possible with
    /// `propagate_handler_failures` enabled and a failing sync handler.
    pub async fn post<E: Any + Send + Sync>(&self, event: E) -> Result<(), DispatchError> {
        self.dispatcher
            .dispatch(EventKey::of::<E>(), Arc::new(event))
            .await
    }

    /// Returns a point-in-time view of the subscriptions for event type `E`.
    ///
    /// The view is independent of the registry: concurrent register or
    /// unregister calls do not affect it once returned.
    pub async fn subscriptions<E: Any>(&self) -> Vec<Arc<Subscription>> {
        self.registry.snapshot(&EventKey::of::<E>()).await
    }

    /// Toggles the `NoSubscribers` diagnostic for events nobody listens to.
    pub fn set_log_unhandled_events(&self, enabled: bool) {
        self.policy.set_log_unhandled_events(enabled);
    }

    /// Toggles the `HandlerFailed` diagnostic for failing handlers.
    pub fn set_log_handler_failures(&self, enabled: bool) {
        self.policy.set_log_handler_failures(enabled);
    }

    /// Toggles surfacing failing sync handlers as `post` errors.
    pub fn set_propagate_handler_failures(&self, enabled: bool) {
        self.policy.set_propagate_handler_failures(enabled);
    }

    /// Drains the worker pool and stops it.
    ///
    /// Already-queued async deliveries run to completion before this
    /// returns. Afterwards the bus still routes sync deliveries, but async
    /// ones are dropped. Idempotent; covers injected pools too, which are
    /// otherwise out of the caller's reach once the bus owns them.
    pub async fn shutdown(&self) {
        self.pool.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::handlers::{HandlerFn, HandlerRef};
    use crate::report::testing::Recorder;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Ping;
    struct Tick;
    struct Boom;
    struct Unheard;

    fn counting<E: Send + Sync + 'static>(
        name: &'static str,
        counter: &Arc<AtomicU32>,
        step: u32,
    ) -> HandlerRef {
        let counter = Arc::clone(counter);
        HandlerFn::arc(name, move |_ev: Arc<E>| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(step, Ordering::SeqCst);
                Ok::<_, HandlerError>(())
            }
        })
    }

    fn recorded_bus(cfg: BusConfig) -> (Arc<EventBus>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let bus = EventBus::builder(cfg)
            .with_report(Arc::clone(&recorder) as Arc<dyn Report>)
            .build();
        (bus, recorder)
    }

    async fn eventually(check: impl Fn() -> bool) -> bool {
        for _ in 0..200 {
            if check() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        check()
    }

    #[tokio::test]
    async fn sync_delivery_completes_before_post_returns() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::sync(counting::<Ping>("count", &counter, 1))],
        )
        .await
        .unwrap();

        bus.post(Ping).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // Exactly once per post.
        bus.post(Ping).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sync_and_async_subscribers_both_receive_the_event() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::sync(counting::<Tick>("inline", &counter, 1))],
        )
        .await
        .unwrap();
        bus.register(
            "b",
            vec![HandlerSpec::pooled(counting::<Tick>("pooled", &counter, 10))],
        )
        .await
        .unwrap();

        bus.post(Tick).await.unwrap();
        // Only the sync handler ran inside post: on this single-threaded
        // runtime the pooled worker cannot have been scheduled yet.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(eventually(|| counter.load(Ordering::SeqCst) == 11).await);
    }

    #[tokio::test]
    async fn unregistered_subscriber_receives_nothing() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::sync(counting::<Ping>("count", &counter, 1))],
        )
        .await
        .unwrap();

        bus.post(Ping).await.unwrap();
        bus.unregister("a").await;
        bus.post(Ping).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(bus.subscriptions::<Ping>().await.is_empty());
    }

    #[tokio::test]
    async fn failing_handler_is_reported_but_does_not_stop_delivery() {
        let (bus, recorder) = recorded_bus(BusConfig {
            log_handler_failures: true,
            ..BusConfig::default()
        });
        let counter = Arc::new(AtomicU32::new(0));

        bus.register(
            "broken",
            vec![HandlerSpec::sync(HandlerFn::arc(
                "on_boom",
                |_ev: Arc<Boom>| async { Err(HandlerError::fail("boom")) },
            ))],
        )
        .await
        .unwrap();
        bus.register(
            "healthy",
            vec![HandlerSpec::sync(counting::<Boom>("count", &counter, 1))],
        )
        .await
        .unwrap();

        bus.post(Boom).await.unwrap();

        assert_eq!(recorder.kinds(), vec![DiagnosticKind::HandlerFailed]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn propagation_surfaces_sync_failures_to_the_poster() {
        let (bus, recorder) = recorded_bus(BusConfig {
            log_handler_failures: true,
            propagate_handler_failures: true,
            ..BusConfig::default()
        });
        bus.register(
            "broken",
            vec![HandlerSpec::sync(HandlerFn::arc(
                "on_boom",
                |_ev: Arc<Boom>| async { Err(HandlerError::fail("boom")) },
            ))],
        )
        .await
        .unwrap();

        let err = bus.post(Boom).await.expect_err("propagation is enabled");
        assert_eq!(err.as_label(), "dispatch_delivery");
        // Both flags applied to the same failure.
        assert_eq!(recorder.kinds(), vec![DiagnosticKind::HandlerFailed]);
    }

    #[tokio::test]
    async fn unheard_events_are_silent_unless_opted_in() {
        let (bus, recorder) = recorded_bus(BusConfig::default());

        bus.post(Unheard).await.unwrap();
        assert!(recorder.kinds().is_empty());

        bus.set_log_unhandled_events(true);
        bus.post(Unheard).await.unwrap();
        assert_eq!(recorder.kinds(), vec![DiagnosticKind::NoSubscribers]);
    }

    #[tokio::test]
    async fn unregistering_an_unknown_subscriber_warns_and_succeeds() {
        let (bus, recorder) = recorded_bus(BusConfig::default());
        bus.unregister("ghost").await;

        let diagnostics = recorder.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownSubscriber);
        assert_eq!(diagnostics[0].subscriber.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn routing_is_exact_type_only() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::sync(counting::<Ping>("count", &counter, 1))],
        )
        .await
        .unwrap();

        bus.post(Tick).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn async_deliveries_run_exactly_once_each() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::pooled(counting::<Tick>("count", &counter, 1))],
        )
        .await
        .unwrap();

        for _ in 0..20 {
            bus.post(Tick).await.unwrap();
        }
        assert!(eventually(|| counter.load(Ordering::SeqCst) == 20).await);
        // Settle and re-check: no duplicate executions trickle in.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn a_failing_async_handler_never_reaches_the_poster() {
        let (bus, recorder) = recorded_bus(BusConfig {
            log_handler_failures: true,
            propagate_handler_failures: true,
            ..BusConfig::default()
        });
        bus.register(
            "broken",
            vec![HandlerSpec::pooled(HandlerFn::arc(
                "on_boom",
                |_ev: Arc<Boom>| async { Err(HandlerError::fail("boom")) },
            ))],
        )
        .await
        .unwrap();

        // post itself succeeds; the failure is logged from the worker.
        bus.post(Boom).await.unwrap();
        assert!(
            eventually(|| recorder.kinds() == vec![DiagnosticKind::HandlerFailed]).await
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn a_concurrent_post_sees_the_whole_batch_or_none_of_it() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));

        // One task churns a three-handler batch in and out while the main
        // task keeps posting. Every post must hit zero or all three.
        let writer = {
            let bus = Arc::clone(&bus);
            let counter = Arc::clone(&counter);
            tokio::spawn(async move {
                for _ in 0..100 {
                    bus.register(
                        "batch",
                        vec![
                            HandlerSpec::sync(counting::<Ping>("first", &counter, 1)),
                            HandlerSpec::sync(counting::<Ping>("second", &counter, 1)),
                            HandlerSpec::sync(counting::<Ping>("third", &counter, 1)),
                        ],
                    )
                    .await
                    .unwrap();
                    tokio::task::yield_now().await;
                    bus.unregister("batch").await;
                }
            })
        };

        // Only sync handlers and only this task posts, so the counter moves
        // exclusively inside post and the delta is exact.
        for _ in 0..200 {
            let before = counter.load(Ordering::SeqCst);
            bus.post(Ping).await.unwrap();
            let delta = counter.load(Ordering::SeqCst) - before;
            assert!(delta == 0 || delta == 3, "partial batch delivered: {delta}");
        }
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_drains_queued_async_deliveries() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::pooled(counting::<Tick>("count", &counter, 1))],
        )
        .await
        .unwrap();

        for _ in 0..5 {
            bus.post(Tick).await.unwrap();
        }
        bus.shutdown().await;
        assert_eq!(counter.load(Ordering::SeqCst), 5);

        // Async deliveries after shutdown are dropped, not queued forever.
        bus.post(Tick).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn duplicate_registration_surfaces_to_the_caller() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        bus.register(
            "a",
            vec![HandlerSpec::sync(counting::<Ping>("count", &counter, 1))],
        )
        .await
        .unwrap();

        let err = bus
            .register(
                "a",
                vec![HandlerSpec::sync(counting::<Ping>("count", &counter, 1))],
            )
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "register_duplicate");
    }
}
