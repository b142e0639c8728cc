//! # Subscription registry - dual index with a single critical section.
//!
//! The registry owns two maps:
//! - `by_event`: event key → subscriptions in registration order; the hot
//!   read path for `post`.
//! - `by_subscriber`: subscriber identity → event keys it registered for;
//!   exists only to drive `unregister`.
//!
//! ## Architecture
//! ```text
//! register(s, specs) ──┐
//!                      ├─► by_subscriber lock (critical section)
//! unregister(s) ───────┘        │
//!                                └─► by_event write lock
//! post(ev) ─────────────────────────► by_event read lock → Vec clone (snapshot)
//! ```
//!
//! ## Rules
//! - `register`/`unregister` serialize on the `by_subscriber` lock and hold
//!   the `by_event` write lock across the whole mutation, so a concurrent
//!   `post` never observes a partially (un)registered subscriber.
//! - Registration is all-or-nothing: the batch is validated before anything
//!   is inserted.
//! - `snapshot` clones the subscription list under the read lock; callers
//!   iterate without holding anything, immune to concurrent mutation.
//! - Removed subscriptions are retired (active → false) before removal, so
//!   in-flight deliveries that already captured them skip execution.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::core::subscription::Subscription;
use crate::error::RegisterError;
use crate::events::EventKey;
use crate::handlers::HandlerSpec;

/// Dual-index subscription store.
pub(crate) struct Registry {
    /// Event key → subscriptions, in registration order.
    by_event: RwLock<HashMap<EventKey, Vec<Arc<Subscription>>>>,
    /// Subscriber → event keys; its lock is the register/unregister
    /// critical section.
    by_subscriber: Mutex<HashMap<String, Vec<EventKey>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            by_event: RwLock::new(HashMap::new()),
            by_subscriber: Mutex::new(HashMap::new()),
        }
    }

    /// Registers one subscriber's whole handler batch atomically.
    pub(crate) async fn register(
        &self,
        subscriber: &str,
        specs: Vec<HandlerSpec>,
    ) -> Result<(), RegisterError> {
        if specs.is_empty() {
            return Err(RegisterError::Empty {
                subscriber: subscriber.to_string(),
            });
        }

        let mut index = self.by_subscriber.lock().await;
        let mut by_event = self.by_event.write().await;

        // Validate the whole batch before touching either map.
        let mut batch_signatures: Vec<String> = Vec::with_capacity(specs.len());
        for spec in &specs {
            let key = spec.handler().event_key();
            let signature = Subscription::signature_of(spec.handler(), key);

            let already_registered = by_event
                .get(&key)
                .map(|subs| {
                    subs.iter()
                        .any(|s| s.subscriber() == subscriber && s.signature() == signature)
                })
                .unwrap_or(false);
            if already_registered || batch_signatures.contains(&signature) {
                return Err(RegisterError::Duplicate {
                    subscriber: subscriber.to_string(),
                    signature,
                });
            }
            batch_signatures.push(signature);
        }

        let keys = index.entry(subscriber.to_string()).or_default();
        for spec in specs {
            let (handler, mode, priority) = spec.into_parts();
            let subscription = Arc::new(Subscription::new(subscriber, handler, mode, priority));
            let key = subscription.event_key();
            by_event.entry(key).or_default().push(subscription);
            keys.push(key);
        }
        Ok(())
    }

    /// Removes every subscription the subscriber holds.
    ///
    /// Returns false when the subscriber had no registrations; the caller
    /// reports that as a warning, never an error.
    pub(crate) async fn unregister(&self, subscriber: &str) -> bool {
        let mut index = self.by_subscriber.lock().await;
        let Some(keys) = index.remove(subscriber) else {
            return false;
        };

        let mut by_event = self.by_event.write().await;
        for key in keys {
            if let Some(subs) = by_event.get_mut(&key) {
                subs.retain(|s| {
                    if s.subscriber() == subscriber {
                        s.retire();
                        false
                    } else {
                        true
                    }
                });
                if subs.is_empty() {
                    by_event.remove(&key);
                }
            }
        }
        true
    }

    /// Returns a point-in-time view of the subscriptions for one event type.
    pub(crate) async fn snapshot(&self, key: &EventKey) -> Vec<Arc<Subscription>> {
        self.by_event
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}
