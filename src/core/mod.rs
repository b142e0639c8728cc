//! Bus core: registry, dispatch and composition.
//!
//! This module contains the embedded implementation of the bus. The public
//! API from this module is [`EventBus`] (the facade), [`BusBuilder`],
//! [`BusConfig`], [`Subscription`] and [`WorkerPool`].
//!
//! Internal modules:
//! - [`registry`]: dual-index subscription store with the register/unregister
//!   critical section;
//! - [`dispatch`]: routing, the two posters and the shared invocation path;
//! - [`pool`]: fixed worker tasks draining the unbounded async-delivery queue;
//! - [`config`]: bus configuration and the runtime-adjustable policy flags;
//! - [`subscription`]: the registry record and its active/inactive lifecycle.

mod builder;
mod bus;
mod config;
mod dispatch;
mod pool;
mod registry;
mod subscription;

pub use builder::BusBuilder;
pub use bus::EventBus;
pub use config::BusConfig;
pub use pool::{Job, WorkerPool};
pub use subscription::Subscription;
