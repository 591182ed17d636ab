//! # Handler registry: subscription storage and resolution.
//!
//! Internal to the crate. The [`Registry`] is plain data guarded by the
//! aggregator's lock; it never performs I/O and never invokes a handler.

mod registry;

pub(crate) use registry::{Registry, ResolvedHandler, SubscriberId};
