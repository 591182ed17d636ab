//! # Envelope: a type-erased message payload.
//!
//! [`Envelope`] pairs an `Arc<dyn Any + Send + Sync>` payload with the
//! `TypeId` and name of the concrete message type it was built from. The
//! dispatcher matches envelopes to registrations by type id; typed bindings
//! recover the concrete message with [`Envelope::downcast`].

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::messages::Message;

/// Type-erased, shareable message payload.
///
/// Cloning an envelope clones the `Arc`, not the message.
#[derive(Clone)]
pub struct Envelope {
    type_id: TypeId,
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Envelope {
    /// Wraps a concrete message.
    pub fn new<M: Message>(message: M) -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            type_name: type_name::<M>(),
            payload: Arc::new(message),
        }
    }

    /// Type id of the wrapped message.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the wrapped message type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Recovers the concrete message, if `M` matches the wrapped type.
    pub fn downcast<M: Message>(&self) -> Option<Arc<M>> {
        Arc::clone(&self.payload).downcast::<M>().ok()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping {
        n: u32,
    }
    impl Message for Ping {}

    struct Pong;
    impl Message for Pong {}

    #[test]
    fn test_downcast_matching_type() {
        let env = Envelope::new(Ping { n: 3 });
        let ping = env.downcast::<Ping>().expect("type matches");
        assert_eq!(ping.n, 3);
    }

    #[test]
    fn test_downcast_wrong_type_is_none() {
        let env = Envelope::new(Ping { n: 3 });
        assert!(env.downcast::<Pong>().is_none());
    }

    #[test]
    fn test_type_id_and_name() {
        let env = Envelope::new(Pong);
        assert_eq!(env.type_id(), TypeId::of::<Pong>());
        assert!(env.type_name().contains("Pong"));
    }
}
