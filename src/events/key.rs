//! # Exact-type routing key.
//!
//! [`EventKey`] identifies an event type at runtime. Routing is exact-match
//! only: a subscription for `Ping` never receives a subtype, a trait object,
//! or anything but a posted `Ping` value.
//!
//! The key pairs the [`TypeId`] (the actual match key) with the type's name,
//! which exists purely so diagnostics and error messages can say *which*
//! event had no subscribers or failed to deliver.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// Shared, type-erased event payload.
///
/// The bus clones this `Arc` once per delivery; handlers downcast it back to
/// the concrete type they declared at registration.
pub type AnyEvent = Arc<dyn Any + Send + Sync>;

/// Exact-type routing key for one event type.
///
/// ### Properties
/// - **Cheap**: `Copy`, two words.
/// - **Exact**: equality is `TypeId` equality; no supertype matching.
/// - **Readable**: carries `std::any::type_name` for diagnostics.
///
/// # Example
/// ```
/// use typebus::EventKey;
///
/// struct Ping;
/// struct Pong;
///
/// assert_eq!(EventKey::of::<Ping>(), EventKey::of::<Ping>());
/// assert_ne!(EventKey::of::<Ping>(), EventKey::of::<Pong>());
/// assert!(EventKey::of::<Ping>().name().ends_with("Ping"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    id: TypeId,
    name: &'static str,
}

impl EventKey {
    /// Returns the key for the concrete event type `E`.
    pub fn of<E: Any>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// Returns the underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick;

    #[test]
    fn key_matches_posted_value_type() {
        let tick: AnyEvent = Arc::new(Tick);
        assert_eq!((*tick).type_id(), EventKey::of::<Tick>().type_id());
    }

    #[test]
    fn keys_for_distinct_types_differ() {
        struct A;
        struct B;
        assert_ne!(EventKey::of::<A>(), EventKey::of::<B>());
    }
}
