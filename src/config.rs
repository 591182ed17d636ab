//! # Aggregator configuration.
//!
//! Provides [`Config`], the settings bundle passed to
//! [`MessageAggregator::new`](crate::MessageAggregator::new).
//!
//! The aggregator is an explicitly constructed, explicitly owned instance:
//! there is no process-wide singleton. Hosting code decides whether to share
//! one instance (behind an `Arc`) or scope one per component.

use crate::policies::FailurePolicy;

/// Configuration for a [`MessageAggregator`](crate::MessageAggregator).
///
/// ## Field semantics
/// - `failure_policy`: how handler failures within one publish are reported
///   (aggregate everything vs. fail fast on the first error).
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Failure reporting policy for publish dispatch.
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Returns a config using the given failure policy.
    ///
    /// # Example
    /// ```
    /// use msgbus::{Config, FailurePolicy};
    ///
    /// let cfg = Config::with_failure_policy(FailurePolicy::FailFast);
    /// assert_eq!(cfg.failure_policy, FailurePolicy::FailFast);
    /// ```
    pub fn with_failure_policy(failure_policy: FailurePolicy) -> Self {
        Self { failure_policy }
    }
}
