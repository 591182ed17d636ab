//! # Failure policy for publish dispatch.
//!
//! Decides what happens when a handler invocation fails mid-publish:
//! keep dispatching and report everything at the end, or stop at the first
//! failure. Aggregation is the default: one misbehaving subscriber should
//! not starve the others of a message they are entitled to see.

/// How handler failures within a single publish are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Attempt every applicable handler; combine all failures into one
    /// [`PublishError::HandlerFailed`](crate::PublishError::HandlerFailed).
    #[default]
    Aggregate,

    /// Stop dispatch after the first failing handler and report only that
    /// failure. The failing handler itself is still awaited to completion.
    FailFast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_aggregate() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Aggregate);
    }
}
