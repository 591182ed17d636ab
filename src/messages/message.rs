//! # Message trait: the dispatch contract for publishable types.
//!
//! A message is any `Send + Sync + 'static` value; its concrete type is the
//! dispatch key. Rust has no runtime type hierarchy to walk, so polymorphic
//! dispatch is declared explicitly: a message lists the *ancestor* forms it
//! also dispatches as, each produced as a widened [`Envelope`] projection.
//!
//! ## Rules
//! - [`Message::ancestor_types`] and [`Message::ancestors`] must agree: the
//!   envelopes returned by `ancestors()` carry exactly the type ids returned
//!   by `ancestor_types()`, in the same order.
//! - Ancestor chains are flat: list transitive ancestors directly, they are
//!   not discovered recursively.
//!
//! ## Example
//! ```rust
//! use std::any::TypeId;
//! use msgbus::{Envelope, Message};
//!
//! struct OrderEvent {
//!     order_id: u64,
//! }
//! impl Message for OrderEvent {}
//!
//! struct OrderPlaced {
//!     order_id: u64,
//!     total_cents: u64,
//! }
//!
//! impl Message for OrderPlaced {
//!     fn ancestor_types() -> Vec<TypeId> {
//!         vec![TypeId::of::<OrderEvent>()]
//!     }
//!
//!     fn ancestors(&self) -> Vec<Envelope> {
//!         vec![Envelope::new(OrderEvent { order_id: self.order_id })]
//!     }
//! }
//!
//! let placed = OrderPlaced { order_id: 7, total_cents: 1250 };
//! assert_eq!(placed.ancestors().len(), 1);
//! ```

use std::any::TypeId;

use crate::messages::Envelope;

/// Marks a type as publishable through the aggregator.
///
/// The concrete type is the dispatch key. Handlers registered for the
/// concrete type receive the message as-is; handlers registered for one of
/// the declared ancestor types receive the widened projection produced by
/// [`Message::ancestors`].
///
/// Both methods default to "no ancestors", which is correct for standalone
/// message types.
pub trait Message: Send + Sync + 'static {
    /// Type ids this message dispatches under, besides its own.
    ///
    /// Used by [`MessageAggregator::handler_exists_for`](crate::MessageAggregator::handler_exists_for),
    /// which has no message instance to project from. Must list the same
    /// types, in the same order, as [`Message::ancestors`].
    fn ancestor_types() -> Vec<TypeId>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Widened envelope projections of this message, one per ancestor type.
    ///
    /// Called once per publish, before handler resolution. Each projection is
    /// delivered to the handlers registered for its type.
    fn ancestors(&self) -> Vec<Envelope> {
        Vec::new()
    }
}
