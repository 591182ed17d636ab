//! # Aggregator core.
//!
//! Houses [`MessageAggregator`], the public facade that orchestrates
//! registry access and asynchronous handler dispatch.

mod aggregator;

pub use aggregator::MessageAggregator;
