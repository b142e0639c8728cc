//! # Handler abstractions and registration specifications.
//!
//! This module provides the core handler-related types:
//! - [`Handle`] - trait for implementing typed async event handlers
//! - [`HandlerFn`] - function-backed handler implementation
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handle>`)
//! - [`HandlerSpec`] - registration tuple bundling handler with mode/priority
//! - [`DispatchMode`] - sync (inline) vs async (pooled) delivery

mod handler;
mod handler_fn;
mod spec;

pub use handler::{Handle, HandlerRef};
pub use handler_fn::HandlerFn;
pub use spec::{DispatchMode, HandlerSpec};
