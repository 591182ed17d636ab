//! # Handler model: typed capabilities and subscriber contracts.
//!
//! This module provides the handler-related types:
//! - [`Handle`] - trait for implementing an async handler for one message type
//! - [`Binding`] - one (message type, callback) capability of a subscriber
//! - [`Subscribe`] - trait a subscriber implements to enumerate its bindings
//! - [`BoxHandlerFuture`] - boxed future returned by handler callbacks

mod binding;
mod handle;
mod subscribe;

pub use binding::{Binding, BoxHandlerFuture};
pub use handle::Handle;
pub use subscribe::Subscribe;

pub(crate) use binding::HandlerFn;
