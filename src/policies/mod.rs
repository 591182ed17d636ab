//! # Dispatch policies.
//!
//! Provides [`FailurePolicy`], which decides how handler failures within one
//! publish are reported.

mod failure;

pub use failure::FailurePolicy;
