//! # msgbus
//!
//! **msgbus** is a loosely-coupled, asynchronous publish/subscribe message
//! aggregator for Rust.
//!
//! Objects subscribe handlers for specific message types and publish messages
//! to all matching subscribers. Dispatch is type-polymorphic (a message may
//! declare ancestor types whose handlers are also invoked), asynchronous, and
//! cooperatively cancelable.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ Subscriber A │   │ Subscriber B │   │ Subscriber C │
//!     │ (Subscribe)  │   │ (Subscribe)  │   │ (Subscribe)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ bindings()       │                  │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  MessageAggregator (facade)                                   │
//! │  - subscribe / unsubscribe (all-or-nothing per subscriber)    │
//! │  - publish (sequential dispatch in registration order)        │
//! │  - handler_exists_for (pure query)                            │
//! └──────────────────────────────┬────────────────────────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │  Registry (behind RwLock)     │
//!                │  TypeId → [Registration, ...] │
//!                └───────────────┬───────────────┘
//!                                │ resolve (read lock, then released)
//!                                ▼
//!       Envelope(concrete) + Envelope(ancestor) + ...
//!                                │
//!             handler1.await → handler2.await → handlerN.await
//!             (outside the lock; cancellation checked between calls)
//! ```
//!
//! ### Publish lifecycle
//! ```text
//! publish(message, token)
//!   ├─► token cancelled?           → Err(Canceled), nothing invoked
//!   ├─► envelopes = [concrete] + message.ancestors()
//!   ├─► resolve handlers (read lock, registration order, lock released)
//!   ├─► no handlers                → Ok(())  (never an error)
//!   └─► for each handler:
//!         ├─► token cancelled?     → Err(Canceled) (in-flight never aborted)
//!         ├─► invoke, await, catch panics
//!         └─► on failure:
//!               ├─ FailurePolicy::FailFast  → Err(HandlerFailed) immediately
//!               └─ FailurePolicy::Aggregate → record, keep dispatching
//!
//! Result: Ok(()) or Err(HandlerFailed { every recorded failure })
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits                      |
//! |-----------------|--------------------------------------------------------------|------------------------------------------|
//! | **Subscribing** | Enumerate typed handler capabilities per subscriber object.  | [`Subscribe`], [`Binding`]               |
//! | **Handling**    | Async, typed message handlers.                               | [`Handle`], [`HandlerError`]             |
//! | **Messages**    | Dispatch keys and explicit ancestor projection.              | [`Message`], [`Envelope`]                |
//! | **Publishing**  | Ordered async dispatch with cancellation and failure policy. | [`MessageAggregator`], [`PublishError`]  |
//! | **Policies**    | Aggregate handler failures or fail fast.                     | [`FailurePolicy`], [`Config`]            |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use async_trait::async_trait;
//! use msgbus::{Binding, Config, Handle, HandlerError, Message, MessageAggregator, Subscribe};
//!
//! struct OrderPlaced {
//!     order_id: u64,
//! }
//! impl Message for OrderPlaced {}
//!
//! struct Audit {
//!     seen: AtomicUsize,
//! }
//!
//! #[async_trait]
//! impl Handle<OrderPlaced> for Audit {
//!     async fn handle(&self, message: &OrderPlaced) -> Result<(), HandlerError> {
//!         let _ = message.order_id;
//!         self.seen.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//!
//! impl Subscribe for Audit {
//!     fn bindings(self: Arc<Self>) -> Vec<Binding> {
//!         vec![Binding::of::<OrderPlaced, _>(&self)]
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = MessageAggregator::new(Config::default());
//!     let audit = Arc::new(Audit { seen: AtomicUsize::new(0) });
//!
//!     bus.subscribe(&audit).await?;
//!     assert!(bus.handler_exists_for::<OrderPlaced>());
//!
//!     bus.publish(OrderPlaced { order_id: 42 }).await?;
//!     assert_eq!(audit.seen.load(Ordering::Relaxed), 1);
//!
//!     bus.unsubscribe(&audit).await?;
//!     assert!(!bus.handler_exists_for::<OrderPlaced>());
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod handlers;
mod messages;
mod policies;
mod registry;

// ---- Public re-exports ----

pub use config::Config;
pub use core::MessageAggregator;
pub use error::{AggregatorError, HandlerError, HandlerFailure, PublishError};
pub use handlers::{Binding, BoxHandlerFuture, Handle, Subscribe};
pub use messages::{Envelope, Message};
pub use policies::FailurePolicy;
