//! # Subscription: one (subscriber, handler) binding in the registry.
//!
//! A [`Subscription`] is created by `register`, lives while reachable from
//! the registry, and is retired (never mutated beyond its active flag) by
//! `unregister`.
//!
//! ## Identity
//! Two subscriptions are equal iff their subscriber identity and signature
//! match. The signature is a stable string built from the handler name and
//! the declared event type name, so equality never depends on handler
//! pointer identity — re-registering the "same" closure produces an equal
//! subscription.
//!
//! ## Lifecycle
//! `Active` (initial) → `Inactive` (terminal, set by `unregister`). There is
//! no way back; a subscriber that wants events again re-registers and gets a
//! fresh subscription.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::EventKey;
use crate::handlers::{DispatchMode, HandlerRef};

/// Registry record binding subscriber + handler + mode + priority.
pub struct Subscription {
    subscriber: String,
    handler: HandlerRef,
    key: EventKey,
    mode: DispatchMode,
    priority: i32,
    signature: String,
    /// Becomes false as soon as the subscriber unregisters. Checked by the
    /// invocation path so a delivery captured before unregister (a queued
    /// async job) is skipped instead of executed.
    active: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(
        subscriber: impl Into<String>,
        handler: HandlerRef,
        mode: DispatchMode,
        priority: i32,
    ) -> Self {
        let key = handler.event_key();
        let signature = Self::signature_of(&handler, key);
        Self {
            subscriber: subscriber.into(),
            handler,
            key,
            mode,
            priority,
            signature,
            active: AtomicBool::new(true),
        }
    }

    /// Builds the stable composite signature, `handler_name(EventTypeName)`.
    pub(crate) fn signature_of(handler: &HandlerRef, key: EventKey) -> String {
        format!("{}({})", handler.name(), key.name())
    }

    /// Returns the owning subscriber's identity.
    pub fn subscriber(&self) -> &str {
        &self.subscriber
    }

    /// Returns the handler bound by this subscription.
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// Returns the event type this subscription matches.
    pub fn event_key(&self) -> EventKey {
        self.key
    }

    /// Returns the delivery mode fixed at registration.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Returns the registration priority.
    ///
    /// Exposed as a pass-through hook for extensions; baseline routing keeps
    /// registration order.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the composite signature used for identity.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// True until the owning subscriber unregisters.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the subscription inactive. Terminal; there is no reactivation.
    pub(crate) fn retire(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.subscriber == other.subscriber && self.signature == other.signature
    }
}

impl Eq for Subscription {}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("subscriber", &self.subscriber)
            .field("signature", &self.signature)
            .field("event", &self.key.name())
            .field("mode", &self.mode)
            .field("priority", &self.priority)
            .field("active", &self.is_active())
            .finish()
    }
}
