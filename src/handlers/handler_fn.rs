//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(Arc<E>) -> Fut`, producing a fresh
//! future per delivery. The typed argument pins down the declared event type:
//! a handler takes exactly one event and nothing else, checked by the
//! compiler rather than at registration time.
//!
//! ## Concurrency semantics
//! - Each delivery calls the closure again and gets a **new** future owning
//!   its own state.
//! - No hidden mutation between deliveries; shared state goes through an
//!   explicit `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use typebus::{HandlerError, HandlerFn, HandlerRef};
//!
//! struct Ping;
//!
//! let h: HandlerRef = HandlerFn::arc("on_ping", |_ev: Arc<Ping>| async move {
//!     // do work...
//!     Ok::<_, HandlerError>(())
//! });
//!
//! assert_eq!(h.name(), "on_ping");
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{AnyEvent, EventKey};
use crate::handlers::handler::Handle;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per delivery.
pub struct HandlerFn<E, F> {
    name: Cow<'static, str>,
    f: F,
    _event: PhantomData<fn(E)>,
}

impl<E, F> HandlerFn<E, F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](crate::HandlerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _event: PhantomData,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use typebus::{EventKey, HandlerError, HandlerFn, HandlerRef};
    ///
    /// struct Tick;
    ///
    /// let h: HandlerRef = HandlerFn::arc("on_tick", |_ev: Arc<Tick>| async {
    ///     Ok::<_, HandlerError>(())
    /// });
    /// assert_eq!(h.event_key(), EventKey::of::<Tick>());
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<E, F, Fut> Handle for HandlerFn<E, F>
where
    E: Any + Send + Sync,
    F: Fn(Arc<E>) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn event_key(&self) -> EventKey {
        EventKey::of::<E>()
    }

    async fn call(&self, event: AnyEvent) -> Result<(), HandlerError> {
        match event.downcast::<E>() {
            Ok(event) => (self.f)(event).await,
            // The registry keys subscriptions by this handler's own event
            // key; a payload of any other type here is a routing bug.
            Err(_) => panic!(
                "typebus routing bug: handler `{}` received an event that is not `{}`",
                self.name,
                EventKey::of::<E>().name()
            ),
        }
    }
}
