//! # Typed async handler capability.
//!
//! [`Handle<M>`] is the "handle a message of type `M` asynchronously"
//! capability. A subscriber type implements it once per message type it
//! handles, then surfaces each implementation through
//! [`Subscribe::bindings`](crate::Subscribe::bindings).

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::messages::Message;

/// # Asynchronous handler for messages of type `M`.
///
/// Implementations may be slow (I/O, batching, retries); within one publish,
/// handlers are awaited one after another in registration order, outside any
/// registry lock, so a handler may itself publish or subscribe without
/// deadlocking.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use msgbus::{Handle, HandlerError, Message};
///
/// struct OrderPlaced {
///     order_id: u64,
/// }
/// impl Message for OrderPlaced {}
///
/// struct Fulfillment;
///
/// #[async_trait]
/// impl Handle<OrderPlaced> for Fulfillment {
///     async fn handle(&self, message: &OrderPlaced) -> Result<(), HandlerError> {
///         if message.order_id == 0 {
///             return Err(HandlerError::fail("invalid order id"));
///         }
///         // ship it...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Handle<M: Message>: Send + Sync + 'static {
    /// Handles a single message.
    ///
    /// Returning an error marks this invocation as failed; it does not stop
    /// dispatch to the remaining handlers of the same publish (under the
    /// default aggregate policy).
    async fn handle(&self, message: &M) -> Result<(), HandlerError>;
}
