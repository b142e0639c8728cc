//! Event model: routing keys and the type-erased event payload.
//!
//! Events are plain user types; the bus never requires a marker trait. What
//! it needs from an event is its exact runtime type (the routing key) and a
//! shareable, type-erased payload to hand to each matching subscription.
//!
//! ## Contents
//! - [`EventKey`] exact-type routing key with a readable name for diagnostics
//! - [`AnyEvent`] the shared, type-erased payload (`Arc<dyn Any + Send + Sync>`)

mod key;

pub use key::{AnyEvent, EventKey};
