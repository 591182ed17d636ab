//! # Core subscriber trait.
//!
//! `Subscribe` is the extension point for plugging objects into the
//! aggregator. There is no reflection in Rust, so a subscriber *enumerates*
//! its handler capabilities explicitly: one [`Binding`] per message type it
//! handles, each typically produced from a [`Handle<M>`](crate::Handle)
//! implementation via [`Binding::of`].
//!
//! ## Contract
//! - `bindings()` is called once per subscribe call; the returned set is
//!   registered atomically with respect to cancellation.
//! - Listing the same message type twice yields a single registration (the
//!   first wins; the duplicate is skipped).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use msgbus::{Binding, Handle, HandlerError, Message, Subscribe};
//!
//! struct OrderPlaced;
//! impl Message for OrderPlaced {}
//!
//! struct OrderCanceled;
//! impl Message for OrderCanceled {}
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Handle<OrderPlaced> for Audit {
//!     async fn handle(&self, _m: &OrderPlaced) -> Result<(), HandlerError> { Ok(()) }
//! }
//!
//! #[async_trait]
//! impl Handle<OrderCanceled> for Audit {
//!     async fn handle(&self, _m: &OrderCanceled) -> Result<(), HandlerError> { Ok(()) }
//! }
//!
//! impl Subscribe for Audit {
//!     fn bindings(self: Arc<Self>) -> Vec<Binding> {
//!         vec![
//!             Binding::of::<OrderPlaced, _>(&self),
//!             Binding::of::<OrderCanceled, _>(&self),
//!         ]
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::handlers::Binding;

/// Contract for subscriber objects.
///
/// A subscriber owns one or more handler capabilities and hands them to the
/// aggregator as [`Binding`]s. Identity for later unsubscription is the `Arc`
/// pointer identity of the subscriber instance.
pub trait Subscribe: Send + Sync + 'static {
    /// Enumerates every handler capability of this subscriber.
    ///
    /// Takes `Arc<Self>` so bindings can downgrade to `Weak` references;
    /// the registry never owns its subscribers.
    fn bindings(self: Arc<Self>) -> Vec<Binding>;

    /// Human-readable name (for logs and failure reports).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
