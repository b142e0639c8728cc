//! # typebus
//!
//! **typebus** is an in-process publish/subscribe event bus for Rust.
//!
//! Subscribers register typed handlers; producers post plain values; the bus
//! routes each event to every subscription matching its exact runtime type,
//! delivering either inline (Sync) or on a shared worker pool (Async). The
//! crate is designed as a building block for decoupling components inside
//! one process.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  register("a", specs)      register("b", specs)       post(event)
//!          │                         │                      │
//!          ▼                         ▼                      ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventBus (facade)                                                │
//! │  - Registry  (event type → subscriptions, subscriber → types)     │
//! │  - Dispatcher (exact-type routing, registration order)            │
//! │  - Policy    (log / propagate flags, silent by default)           │
//! └──────────────┬───────────────────────────────┬────────────────────┘
//!                │ DispatchMode::Sync            │ DispatchMode::Async
//!                ▼                               ▼
//!         ┌──────────────┐               ┌───────────────────────────┐
//!         │  SyncPoster  │               │  AsyncPoster              │
//!         │ (awaited in  │               │  ──► [unbounded queue]    │
//!         │  post())     │               │        ──► WorkerPool     │
//!         └──────┬───────┘               │   worker1 .. workerN      │
//!                │                       └────────────┬──────────────┘
//!                ▼                                    ▼
//!         ┌──────────────────────────────────────────────────────────┐
//!         │  Invoker: active check → handler.call() under            │
//!         │  catch_unwind → failure policy (log and/or propagate)    │
//!         └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Delivery rules
//! - **Exact matching**: a `Ping` handler fires for posted `Ping` values,
//!   nothing else; there is no supertype, trait or wildcard matching.
//! - **Sync** subscriptions run inline, in registration order; `post`
//!   returns only after all of them completed.
//! - **Async** subscriptions become jobs on the shared pool; `post` never
//!   waits and no ordering holds between two async deliveries.
//! - One failing handler never prevents delivery to the others; by default
//!   the bus is silent about both failures and unheard events, and both
//!   diagnostics are explicit opt-ins.
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                        |
//! |-------------------|----------------------------------------------------------------------|-------------------------------------------|
//! | **Handlers**      | Typed async handlers from closures, easy to compose.                 | [`Handle`], [`HandlerFn`], [`HandlerRef`] |
//! | **Registration**  | Atomic per-subscriber batches with mode and priority.                | [`HandlerSpec`], [`DispatchMode`]         |
//! | **Delivery**      | Inline or pooled, with a fixed-size injectable worker pool.          | [`EventBus`], [`WorkerPool`]              |
//! | **Diagnostics**   | Structured, injectable reporting (silent by default).                | [`Report`], [`Diagnostic`], [`LogWriter`] |
//! | **Errors**        | Typed errors for registration and propagated delivery failures.      | [`RegisterError`], [`DispatchError`]      |
//! | **Configuration** | Centralized flags, adjustable on a live bus.                         | [`BusConfig`]                             |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use typebus::{BusConfig, EventBus, HandlerError, HandlerFn, HandlerSpec};
//!
//! struct Tick;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = EventBus::builder(BusConfig::default()).build();
//!
//!     let counter = Arc::new(AtomicU32::new(0));
//!     let seen = Arc::clone(&counter);
//!
//!     // One inline handler and one pooled handler for the same event type.
//!     bus.register(
//!         "metrics",
//!         vec![
//!             HandlerSpec::sync(HandlerFn::arc("count", move |_ev: Arc<Tick>| {
//!                 let seen = Arc::clone(&seen);
//!                 async move {
//!                     seen.fetch_add(1, Ordering::SeqCst);
//!                     Ok::<_, HandlerError>(())
//!                 }
//!             })),
//!             HandlerSpec::pooled(HandlerFn::arc("audit", |_ev: Arc<Tick>| async {
//!                 // ship it somewhere...
//!                 Ok::<_, HandlerError>(())
//!             })),
//!         ],
//!     )
//!     .await?;
//!
//!     bus.post(Tick).await?;
//!     // The sync handler already ran; the pooled one completes later.
//!     assert_eq!(counter.load(Ordering::SeqCst), 1);
//!
//!     bus.unregister("metrics").await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod handlers;
mod report;

// ---- Public re-exports ----

pub use core::{BusBuilder, BusConfig, EventBus, Job, Subscription, WorkerPool};
pub use error::{DispatchError, HandlerError, RegisterError};
pub use events::{AnyEvent, EventKey};
pub use handlers::{DispatchMode, Handle, HandlerFn, HandlerRef, HandlerSpec};
pub use report::{Diagnostic, DiagnosticKind, LogWriter, Report};
