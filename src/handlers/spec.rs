//! # Registration specification for one handler.
//!
//! Defines [`HandlerSpec`] a registration tuple bundling a handler with its
//! delivery mode and priority, and [`DispatchMode`] the two delivery
//! strategies.
//!
//! A spec is what [`EventBus::register`](crate::EventBus::register) consumes:
//! one subscriber hands over a batch of specs, one per handler.

use crate::handlers::handler::HandlerRef;

/// Delivery strategy for one subscription, fixed at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Invoke the handler inline: `post` awaits it before moving on.
    Sync,
    /// Submit the invocation to the shared worker pool: `post` never waits.
    Async,
}

/// Specification for registering one handler.
///
/// Bundles together:
/// - The handler itself ([`HandlerRef`])
/// - Delivery mode ([`DispatchMode`])
/// - Priority (pass-through metadata; baseline routing keeps registration
///   order and does not reorder by it)
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use typebus::{DispatchMode, HandlerError, HandlerFn, HandlerSpec};
///
/// struct Tick;
///
/// let spec = HandlerSpec::new(
///     HandlerFn::arc("on_tick", |_ev: Arc<Tick>| async {
///         Ok::<_, HandlerError>(())
///     }),
///     DispatchMode::Async,
///     0,
/// );
/// assert_eq!(spec.mode(), DispatchMode::Async);
/// ```
#[derive(Clone)]
pub struct HandlerSpec {
    handler: HandlerRef,
    mode: DispatchMode,
    priority: i32,
}

impl HandlerSpec {
    /// Creates a new registration specification with explicit parameters.
    ///
    /// ### Parameters
    /// - `handler`: Handler to register
    /// - `mode`: Inline (`Sync`) or pooled (`Async`) delivery
    /// - `priority`: Carried on the subscription; not consumed by routing
    pub fn new(handler: HandlerRef, mode: DispatchMode, priority: i32) -> Self {
        Self {
            handler,
            mode,
            priority,
        }
    }

    /// Creates a synchronous spec with default priority.
    pub fn sync(handler: HandlerRef) -> Self {
        Self::new(handler, DispatchMode::Sync, 0)
    }

    /// Creates a pooled-asynchronous spec with default priority.
    pub fn pooled(handler: HandlerRef) -> Self {
        Self::new(handler, DispatchMode::Async, 0)
    }

    /// Returns reference to the handler.
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// Returns the delivery mode.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns a new spec with updated priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn into_parts(self) -> (HandlerRef, DispatchMode, i32) {
        (self.handler, self.mode, self.priority)
    }
}
