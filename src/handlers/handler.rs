//! # Handler abstraction.
//!
//! This module defines the [`Handle`] trait: a single-event-type async
//! callable. The common handle type is [`HandlerRef`], an `Arc<dyn Handle>`
//! suitable for sharing between the registry and in-flight deliveries.
//!
//! A handler declares exactly one event type (its [`event_key`](Handle::event_key));
//! the registry keys its subscription by that declaration, so `call` only
//! ever sees payloads of the declared type.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{AnyEvent, EventKey};

/// Shared reference to a handler.
pub type HandlerRef = Arc<dyn Handle>;

/// # A typed, asynchronous event handler.
///
/// A `Handle` has a stable [`name`](Handle::name) (part of the subscription's
/// identity), a declared event type, and an async [`call`](Handle::call)
/// method that receives the type-erased payload.
///
/// Most users never implement this directly; [`HandlerFn`](crate::HandlerFn)
/// wraps a typed closure into a `Handle`.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use typebus::{AnyEvent, EventKey, Handle, HandlerError};
///
/// struct Ping;
/// struct OnPing;
///
/// #[async_trait]
/// impl Handle for OnPing {
///     fn name(&self) -> &str { "on_ping" }
///
///     fn event_key(&self) -> EventKey { EventKey::of::<Ping>() }
///
///     async fn call(&self, _event: AnyEvent) -> Result<(), HandlerError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Handle: Send + Sync + 'static {
    /// Returns a stable, human-readable handler name.
    ///
    /// Together with the event type name it forms the subscription's
    /// signature, so it should not change between registrations.
    fn name(&self) -> &str;

    /// Returns the event type this handler is bound to.
    fn event_key(&self) -> EventKey;

    /// Processes one event.
    ///
    /// The payload is guaranteed to be of the declared event type: the
    /// registry keys subscriptions by [`event_key`](Handle::event_key), and
    /// the dispatcher routes by the posted value's exact type.
    async fn call(&self, event: AnyEvent) -> Result<(), HandlerError>;
}
