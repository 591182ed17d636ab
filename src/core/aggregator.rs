//! # MessageAggregator: the public pub/sub facade.
//!
//! The aggregator owns the handler registry behind an `RwLock` and drives
//! subscribe/unsubscribe/publish with cooperative cancellation.
//!
//! ## Key responsibilities
//! - register/unregister subscriber bindings atomically per subscriber
//! - resolve applicable handlers (concrete type + declared ancestors)
//! - invoke handlers sequentially in registration order, **outside** the lock
//! - isolate handler panics and apply the configured [`FailurePolicy`]
//!
//! ## Locking discipline
//! The registry lock is never held across an await point. Mutations
//! (subscribe/unsubscribe) take the write lock; publish takes the read lock
//! only to snapshot the resolved handler list, then releases it before the
//! first invocation. Reentrant handlers (a handler that publishes or
//! subscribes) therefore cannot deadlock.
//!
//! ## Cancellation points
//! ```text
//! subscribe/unsubscribe: [check] → inspect bindings → [check] → mutate (atomic)
//! publish:               [check] → resolve → ([check] → invoke handler)*
//! ```
//! A handler that is already running is never forcibly aborted; cancellation
//! between handlers fails the publish with `Canceled`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use msgbus::{Binding, Config, HandlerError, Message, MessageAggregator, Subscribe};
//!
//! struct Tick;
//! impl Message for Tick {}
//!
//! struct Clock;
//! impl Subscribe for Clock {
//!     fn bindings(self: Arc<Self>) -> Vec<Binding> {
//!         vec![Binding::from_fn(|_t: Arc<Tick>| async move {
//!             Ok::<(), HandlerError>(())
//!         })]
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = MessageAggregator::new(Config::default());
//!     let clock = Arc::new(Clock);
//!
//!     bus.subscribe(&clock).await?;
//!     bus.publish(Tick).await?;
//!
//!     // Publishing with zero subscribers is a successful no-op:
//!     bus.unsubscribe(&clock).await?;
//!     bus.publish(Tick).await?;
//!     Ok(())
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{AggregatorError, HandlerError, HandlerFailure, PublishError};
use crate::handlers::Subscribe;
use crate::messages::{Envelope, Message};
use crate::policies::FailurePolicy;
use crate::registry::{Registry, ResolvedHandler, SubscriberId};

/// Loosely-coupled publish/subscribe message aggregator.
///
/// One explicitly constructed, explicitly owned instance; hosting code
/// decides whether to share it process-wide (behind an `Arc`) or scope it
/// per component.
pub struct MessageAggregator {
    registry: RwLock<Registry>,
    config: Config,
}

impl MessageAggregator {
    /// Creates a new, empty aggregator.
    pub fn new(config: Config) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            config,
        }
    }

    /// Returns the aggregator configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True iff any handler is registered for `M` or one of its declared
    /// ancestor types.
    ///
    /// Pure query: no side effects, never suspends, never fails.
    #[must_use]
    pub fn handler_exists_for<M: Message>(&self) -> bool {
        let mut types = vec![TypeId::of::<M>()];
        types.extend(M::ancestor_types());
        self.read().has_any(&types)
    }

    /// Total number of live handler registrations.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.read().len()
    }

    /// True if no handler is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handler_count() == 0
    }

    /// Subscribes an object to every message type it declares a binding for.
    ///
    /// Equivalent to [`subscribe_with`](Self::subscribe_with) with a token
    /// that never fires.
    pub async fn subscribe<S: Subscribe>(&self, subscriber: &Arc<S>) -> Result<(), AggregatorError> {
        self.subscribe_with(subscriber, CancellationToken::new()).await
    }

    /// Subscribes an object, observing the given cancellation token.
    ///
    /// Registration is all-or-nothing: the token is checked before the
    /// registry is touched, never mid-mutation, so a cancelled call leaves no
    /// partial registrations. Re-subscribing an already-subscribed object is
    /// idempotent; duplicate (subscriber, type) pairs are skipped.
    pub async fn subscribe_with<S: Subscribe>(
        &self,
        subscriber: &Arc<S>,
        token: CancellationToken,
    ) -> Result<(), AggregatorError> {
        if token.is_cancelled() {
            return Err(AggregatorError::Canceled);
        }

        let bindings = Arc::clone(subscriber).bindings();
        let owner = SubscriberId::of(subscriber);
        let name = subscriber.name();

        // Last check before the atomic mutation.
        if token.is_cancelled() {
            return Err(AggregatorError::Canceled);
        }

        let mut registry = self.write();
        for binding in &bindings {
            if !registry.register(owner, name, binding) {
                log::debug!(
                    "skipping duplicate registration: subscriber={} message={}",
                    name,
                    binding.message_name()
                );
            }
        }
        Ok(())
    }

    /// Removes every registration owned by `subscriber`.
    ///
    /// Equivalent to [`unsubscribe_with`](Self::unsubscribe_with) with a
    /// token that never fires.
    pub async fn unsubscribe<S: Subscribe>(
        &self,
        subscriber: &Arc<S>,
    ) -> Result<(), AggregatorError> {
        self.unsubscribe_with(subscriber, CancellationToken::new()).await
    }

    /// Removes every registration owned by `subscriber`, observing the token.
    ///
    /// Idempotent: unsubscribing a never-subscribed object succeeds as a
    /// no-op. Removal is atomic per subscriber.
    pub async fn unsubscribe_with<S: Subscribe>(
        &self,
        subscriber: &Arc<S>,
        token: CancellationToken,
    ) -> Result<(), AggregatorError> {
        if token.is_cancelled() {
            return Err(AggregatorError::Canceled);
        }

        let removed = self.write().unregister(SubscriberId::of(subscriber));
        if removed > 0 {
            log::debug!(
                "unsubscribed: subscriber={} registrations={}",
                subscriber.name(),
                removed
            );
        }
        Ok(())
    }

    /// Publishes a message to every applicable handler.
    ///
    /// Equivalent to [`publish_with`](Self::publish_with) with a token that
    /// never fires.
    pub async fn publish<M: Message>(&self, message: M) -> Result<(), PublishError> {
        self.publish_with(message, CancellationToken::new()).await
    }

    /// Publishes a message, observing the given cancellation token.
    ///
    /// Resolves handlers for the concrete message type and every declared
    /// ancestor, then invokes them sequentially in registration order,
    /// awaiting each. Completion means every resolved handler has been
    /// attempted (or dispatch was cut short by cancellation/fail-fast).
    ///
    /// - Zero handlers: immediate `Ok(())`.
    /// - Cancellation fires mid-dispatch: the in-flight handler finishes,
    ///   remaining handlers are skipped, the publish fails with
    ///   [`PublishError::Canceled`]. Completed handlers are not rolled back.
    /// - Handler failures and panics are reported per the configured
    ///   [`FailurePolicy`]; registry state stays valid regardless.
    pub async fn publish_with<M: Message>(
        &self,
        message: M,
        token: CancellationToken,
    ) -> Result<(), PublishError> {
        if token.is_cancelled() {
            return Err(PublishError::Canceled);
        }

        let ancestors = message.ancestors();
        let mut envelopes = Vec::with_capacity(1 + ancestors.len());
        envelopes.push(Envelope::new(message));
        envelopes.extend(ancestors);

        let message_name = envelopes[0].type_name();

        // Snapshot under the read lock; invocation happens after release.
        let resolved = self.read().resolve(&envelopes);
        if resolved.is_empty() {
            return Ok(());
        }

        let total = resolved.len();
        let mut attempted = 0usize;
        let mut failures: Vec<HandlerFailure> = Vec::new();

        for handler in resolved {
            if token.is_cancelled() {
                log::warn!(
                    "publish of {message_name} canceled after {attempted}/{total} handler(s)"
                );
                return Err(PublishError::Canceled);
            }

            attempted += 1;
            let ResolvedHandler {
                subscriber_name,
                message_name: handled_as,
                callback,
                envelope,
                ..
            } = handler;

            if let Err(error) = Self::invoke((*callback)(envelope)).await {
                log::warn!(
                    "handler failed: subscriber={subscriber_name} message={handled_as} error={error}"
                );
                let failure = HandlerFailure {
                    subscriber: subscriber_name,
                    message: handled_as,
                    error,
                };
                match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        return Err(PublishError::HandlerFailed {
                            message: message_name,
                            failures: vec![failure],
                        });
                    }
                    FailurePolicy::Aggregate => failures.push(failure),
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PublishError::HandlerFailed {
                message: message_name,
                failures,
            })
        }
    }

    /// Awaits one handler invocation, converting panics into
    /// [`HandlerError::Panicked`] so a misbehaving handler cannot unwind
    /// through the publish.
    async fn invoke(
        fut: impl std::future::Future<Output = Result<(), HandlerError>>,
    ) -> Result<(), HandlerError> {
        match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            Ok(result) => result,
            Err(panic_err) => Err(HandlerError::Panicked {
                info: panic_info(&*panic_err),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        // No code path panics while holding the guard, so poisoning is
        // unreachable; recover instead of propagating.
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Renders a caught panic payload as text.
fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::handlers::Binding;

    struct Ping;
    impl Message for Ping {}

    struct Counter {
        hits: AtomicUsize,
    }

    impl Subscribe for Counter {
        fn bindings(self: Arc<Self>) -> Vec<Binding> {
            let me = Arc::downgrade(&self);
            vec![Binding::from_fn(move |_p: Arc<Ping>| {
                let me = me.clone();
                async move {
                    if let Some(me) = me.upgrade() {
                        me.hits.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok::<(), HandlerError>(())
                }
            })]
        }
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let bus = MessageAggregator::new(Config::default());
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });

        bus.subscribe(&counter).await.unwrap();
        bus.subscribe(&counter).await.unwrap();
        assert_eq!(bus.handler_count(), 1);

        bus.publish(Ping).await.unwrap();
        assert_eq!(counter.hits.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_canceled_token_rejects_subscribe() {
        let bus = MessageAggregator::new(Config::default());
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });

        let token = CancellationToken::new();
        token.cancel();

        let err = bus.subscribe_with(&counter, token).await.unwrap_err();
        assert_eq!(err.as_label(), "aggregator_canceled");
        assert!(bus.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_skipped() {
        let bus = MessageAggregator::new(Config::default());
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });

        bus.subscribe(&counter).await.unwrap();
        drop(counter);

        // Registration still exists, but the weak upgrade fails: no-op.
        bus.publish(Ping).await.unwrap();
    }
}
