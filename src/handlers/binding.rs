//! # Binding: one handler capability of a subscriber.
//!
//! A [`Binding`] pairs a message `TypeId` with a type-erased callback that
//! downcasts the incoming [`Envelope`] and drives the typed handler. Two
//! constructors are provided:
//!
//! - [`Binding::of`] wraps a [`Handle<M>`] implementation on the subscriber.
//!   The callback captures a `Weak` reference, so the registry never keeps a
//!   dropped subscriber alive; a dead binding resolves to a successful no-op.
//! - [`Binding::from_fn`] wraps a plain closure, for hosts that bind handlers
//!   without a dedicated handler type.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use msgbus::{Binding, HandlerError, Message};
//!
//! struct Tick;
//! impl Message for Tick {}
//!
//! let binding = Binding::from_fn(|_tick: Arc<Tick>| async move {
//!     Ok::<(), HandlerError>(())
//! });
//! assert!(binding.message_name().contains("Tick"));
//! ```

use std::any::{type_name, TypeId};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use futures::future::BoxFuture;

use crate::error::HandlerError;
use crate::handlers::Handle;
use crate::messages::{Envelope, Message};

/// Boxed future produced by a handler callback.
pub type BoxHandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// Type-erased handler callback: takes the matching envelope, returns a
/// future that completes when the handler is done.
pub(crate) type HandlerFn = Arc<dyn Fn(Envelope) -> BoxHandlerFuture + Send + Sync>;

/// One (message type, handler callback) capability.
///
/// Produced by [`Subscribe::bindings`](crate::Subscribe::bindings); consumed
/// by [`MessageAggregator::subscribe`](crate::MessageAggregator::subscribe).
#[derive(Clone)]
pub struct Binding {
    message_type: TypeId,
    message_name: &'static str,
    callback: HandlerFn,
}

impl Binding {
    /// Binds the [`Handle<M>`] implementation of `subscriber`.
    ///
    /// The callback holds only a `Weak` reference to the subscriber. If the
    /// subscriber is dropped while still registered, later invocations are
    /// silent no-ops until the registration is removed.
    pub fn of<M, S>(subscriber: &Arc<S>) -> Self
    where
        M: Message,
        S: Handle<M>,
    {
        let weak: Weak<S> = Arc::downgrade(subscriber);
        let callback: HandlerFn = Arc::new(move |envelope: Envelope| {
            let weak = weak.clone();
            Box::pin(async move {
                let Some(subscriber) = weak.upgrade() else {
                    return Ok(());
                };
                let Some(message) = envelope.downcast::<M>() else {
                    return Ok(());
                };
                subscriber.handle(message.as_ref()).await
            })
        });

        Self {
            message_type: TypeId::of::<M>(),
            message_name: type_name::<M>(),
            callback,
        }
    }

    /// Binds a closure as the handler for messages of type `M`.
    ///
    /// The closure *creates* a new future per invocation; shared state goes
    /// through an explicit `Arc` inside the closure.
    pub fn from_fn<M, F, Fut>(f: F) -> Self
    where
        M: Message,
        F: Fn(Arc<M>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let f = Arc::new(f);
        let callback: HandlerFn = Arc::new(move |envelope: Envelope| {
            let f = Arc::clone(&f);
            Box::pin(async move {
                match envelope.downcast::<M>() {
                    Some(message) => (f)(message).await,
                    None => Ok(()),
                }
            })
        });

        Self {
            message_type: TypeId::of::<M>(),
            message_name: type_name::<M>(),
            callback,
        }
    }

    /// Type id of the handled message type.
    #[must_use]
    pub fn message_type(&self) -> TypeId {
        self.message_type
    }

    /// Name of the handled message type.
    #[must_use]
    pub fn message_name(&self) -> &'static str {
        self.message_name
    }

    /// Shared handle to the callback.
    pub(crate) fn callback(&self) -> HandlerFn {
        Arc::clone(&self.callback)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("message_name", &self.message_name)
            .finish_non_exhaustive()
    }
}
