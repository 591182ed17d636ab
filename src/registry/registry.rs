//! # Type index of handler registrations.
//!
//! Maps message `TypeId`s to the registrations for exactly that type, and
//! resolves a published message's envelope list (concrete + ancestors) to
//! the applicable handlers in global registration order.
//!
//! ## Architecture
//! ```text
//! register(owner, binding)      index: TypeId → [Registration(seq), ...]
//!        │                                  ▲
//!        └── duplicate (owner, type)? ──────┘   skip (idempotent)
//!
//! resolve([env_concrete, env_ancestor, ...])
//!        ├── per envelope: index[type_id] → pair registrations with envelope
//!        └── sort by seq  → Vec<ResolvedHandler> (registration order)
//!
//! unregister(owner)
//!        └── drop every registration owned by `owner`; prune empty types
//! ```
//!
//! ## Rules
//! - One registration per (subscriber, message type) pair.
//! - `seq` is a per-registry counter; resolution order is registration order
//!   regardless of which type id a registration sits under.
//! - The registry stores callbacks only; invocation happens in the facade,
//!   outside the lock that guards this structure.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::handlers::{Binding, HandlerFn};
use crate::messages::Envelope;

/// Identity of a subscriber: the `Arc` pointer it was subscribed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SubscriberId(usize);

impl SubscriberId {
    /// Derives the id from the subscriber's `Arc` allocation address.
    pub(crate) fn of<S>(subscriber: &Arc<S>) -> Self {
        Self(Arc::as_ptr(subscriber) as *const () as usize)
    }
}

/// One stored (subscriber, message type, callback) binding.
struct Registration {
    owner: SubscriberId,
    seq: u64,
    subscriber_name: &'static str,
    message_name: &'static str,
    callback: HandlerFn,
}

/// A registration matched to the envelope it should receive.
pub(crate) struct ResolvedHandler {
    pub(crate) seq: u64,
    pub(crate) subscriber_name: &'static str,
    pub(crate) message_name: &'static str,
    pub(crate) callback: HandlerFn,
    pub(crate) envelope: Envelope,
}

/// Storage and resolution of handler subscriptions.
pub(crate) struct Registry {
    index: HashMap<TypeId, Vec<Registration>>,
    next_seq: u64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Adds a binding for `owner`.
    ///
    /// Returns `false` (without modifying anything) if `owner` already holds
    /// a registration for the binding's message type.
    pub(crate) fn register(
        &mut self,
        owner: SubscriberId,
        subscriber_name: &'static str,
        binding: &Binding,
    ) -> bool {
        let regs = self.index.entry(binding.message_type()).or_default();
        if regs.iter().any(|r| r.owner == owner) {
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        regs.push(Registration {
            owner,
            seq,
            subscriber_name,
            message_name: binding.message_name(),
            callback: binding.callback(),
        });
        true
    }

    /// Removes every registration owned by `owner`.
    ///
    /// Returns the number of removed registrations (0 is not an error).
    /// Type entries left empty are pruned.
    pub(crate) fn unregister(&mut self, owner: SubscriberId) -> usize {
        let mut removed = 0;
        self.index.retain(|_, regs| {
            let before = regs.len();
            regs.retain(|r| r.owner != owner);
            removed += before - regs.len();
            !regs.is_empty()
        });
        removed
    }

    /// Resolves every handler applicable to the given envelopes.
    ///
    /// Envelopes with duplicate type ids are considered once. The result is
    /// ordered by registration sequence; empty when nothing matches.
    pub(crate) fn resolve(&self, envelopes: &[Envelope]) -> Vec<ResolvedHandler> {
        let mut seen: HashSet<TypeId> = HashSet::with_capacity(envelopes.len());
        let mut resolved = Vec::new();

        for envelope in envelopes {
            if !seen.insert(envelope.type_id()) {
                continue;
            }
            if let Some(regs) = self.index.get(&envelope.type_id()) {
                for reg in regs {
                    resolved.push(ResolvedHandler {
                        seq: reg.seq,
                        subscriber_name: reg.subscriber_name,
                        message_name: reg.message_name,
                        callback: Arc::clone(&reg.callback),
                        envelope: envelope.clone(),
                    });
                }
            }
        }

        resolved.sort_by_key(|h| h.seq);
        resolved
    }

    /// True iff any of the given type ids has at least one registration.
    pub(crate) fn has_any(&self, types: &[TypeId]) -> bool {
        types.iter().any(|t| self.index.contains_key(t))
    }

    /// Total number of live registrations.
    pub(crate) fn len(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;

    struct OrderEvent;
    impl Message for OrderEvent {}

    struct OrderPlaced;
    impl Message for OrderPlaced {
        fn ancestor_types() -> Vec<TypeId> {
            vec![TypeId::of::<OrderEvent>()]
        }
        fn ancestors(&self) -> Vec<Envelope> {
            vec![Envelope::new(OrderEvent)]
        }
    }

    fn noop_binding<M: Message>() -> Binding {
        Binding::from_fn(|_m: std::sync::Arc<M>| async move {
            Ok::<(), crate::error::HandlerError>(())
        })
    }

    #[test]
    fn test_register_then_resolve() {
        let mut reg = Registry::new();
        assert!(reg.register(SubscriberId(1), "a", &noop_binding::<OrderPlaced>()));

        let resolved = reg.resolve(&[Envelope::new(OrderPlaced)]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].subscriber_name, "a");
    }

    #[test]
    fn test_duplicate_owner_type_pair_is_skipped() {
        let mut reg = Registry::new();
        assert!(reg.register(SubscriberId(1), "a", &noop_binding::<OrderPlaced>()));
        assert!(!reg.register(SubscriberId(1), "a", &noop_binding::<OrderPlaced>()));
        assert_eq!(reg.len(), 1);

        // Another owner for the same type is a distinct registration.
        assert!(reg.register(SubscriberId(2), "b", &noop_binding::<OrderPlaced>()));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_unregister_removes_all_owner_bindings() {
        let mut reg = Registry::new();
        reg.register(SubscriberId(1), "a", &noop_binding::<OrderPlaced>());
        reg.register(SubscriberId(1), "a", &noop_binding::<OrderEvent>());
        reg.register(SubscriberId(2), "b", &noop_binding::<OrderPlaced>());

        assert_eq!(reg.unregister(SubscriberId(1)), 2);
        assert_eq!(reg.len(), 1);
        assert!(reg.has_any(&[TypeId::of::<OrderPlaced>()]));
        assert!(!reg.has_any(&[TypeId::of::<OrderEvent>()]));
    }

    #[test]
    fn test_unregister_unknown_owner_is_noop() {
        let mut reg = Registry::new();
        assert_eq!(reg.unregister(SubscriberId(9)), 0);
    }

    #[test]
    fn test_resolve_matches_ancestor_envelopes_in_registration_order() {
        let mut reg = Registry::new();
        // Base handler registered first, derived handler second.
        reg.register(SubscriberId(1), "base", &noop_binding::<OrderEvent>());
        reg.register(SubscriberId(2), "derived", &noop_binding::<OrderPlaced>());

        let placed = OrderPlaced;
        let mut envelopes = vec![Envelope::new(OrderPlaced)];
        envelopes.extend(placed.ancestors());

        let resolved = reg.resolve(&envelopes);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].subscriber_name, "base");
        assert_eq!(resolved[1].subscriber_name, "derived");
        assert!(resolved[0].message_name.contains("OrderEvent"));
        assert!(resolved[1].message_name.contains("OrderPlaced"));
    }

    #[test]
    fn test_resolve_dedupes_envelope_types() {
        let mut reg = Registry::new();
        reg.register(SubscriberId(1), "a", &noop_binding::<OrderEvent>());

        let envelopes = vec![Envelope::new(OrderEvent), Envelope::new(OrderEvent)];
        assert_eq!(reg.resolve(&envelopes).len(), 1);
    }

    #[test]
    fn test_resolve_nothing_matches_is_empty() {
        let reg = Registry::new();
        assert!(reg.resolve(&[Envelope::new(OrderPlaced)]).is_empty());
        assert!(!reg.has_any(&[TypeId::of::<OrderPlaced>()]));
    }
}
