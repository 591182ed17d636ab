//! Error types used by the aggregator and by message handlers.
//!
//! This module defines three error enums:
//!
//! - [`AggregatorError`] — errors raised by subscribe/unsubscribe operations.
//! - [`PublishError`] — errors raised by a publish operation as a whole.
//! - [`HandlerError`] — errors raised by individual handler invocations.
//!
//! All types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Handler failures during one publish are collected into
//! [`PublishError::HandlerFailed`] as a list of [`HandlerFailure`] records;
//! a publish never corrupts registry state, whatever its handlers do.

use std::fmt;

use thiserror::Error;

/// # Errors produced by subscribe/unsubscribe operations.
///
/// Subscribe and unsubscribe are idempotent: they never fail because an
/// object is "already subscribed" or "not subscribed". The only failure
/// mode is cooperative cancellation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// The supplied cancellation token fired before the operation completed.
    ///
    /// No partial registrations are left behind: either every binding of the
    /// subscriber was applied, or none was.
    #[error("operation canceled before completion")]
    Canceled,
}

impl AggregatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use msgbus::AggregatorError;
    ///
    /// assert_eq!(AggregatorError::Canceled.as_label(), "aggregator_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AggregatorError::Canceled => "aggregator_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            AggregatorError::Canceled => "operation canceled".to_string(),
        }
    }
}

/// # Errors produced by a single handler invocation.
///
/// Returned by [`Handle::handle`](crate::Handle::handle) implementations, or
/// synthesized by the dispatcher when a handler panics. One failing handler
/// never prevents the remaining handlers of the same publish from running
/// (under the default [`FailurePolicy::Aggregate`](crate::FailurePolicy)).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler execution failed.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Handler observed cancellation and gave up cooperatively.
    #[error("handler canceled")]
    Canceled,

    /// Handler panicked; the panic was caught by the dispatcher.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl HandlerError {
    /// Convenience constructor for [`HandlerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use msgbus::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::Canceled => "handler_canceled",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::Canceled => "canceled".to_string(),
            HandlerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// One failed handler invocation within a publish.
///
/// Identifies the failing handler by subscriber name and the message type it
/// was registered for, alongside the underlying [`HandlerError`].
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the owning subscriber (see [`Subscribe::name`](crate::Subscribe::name)).
    pub subscriber: &'static str,
    /// Name of the message type the handler was registered for.
    pub message: &'static str,
    /// The error the handler produced.
    pub error: HandlerError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subscriber={} message={} error={}",
            self.subscriber, self.message, self.error
        )
    }
}

/// # Errors produced by a publish operation.
///
/// A publish with zero matching handlers is a successful no-op, never an
/// error. Handler failures are reported once dispatch to all applicable
/// handlers has been attempted (or immediately, under
/// [`FailurePolicy::FailFast`](crate::FailurePolicy)).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PublishError {
    /// The supplied cancellation token fired before dispatch completed.
    ///
    /// Handlers already invoked are not rolled back; handlers not yet
    /// started are skipped. An in-flight handler is never forcibly aborted.
    #[error("publish canceled before dispatch completed")]
    Canceled,

    /// One or more handler invocations failed during dispatch.
    #[error("{} handler(s) failed for {message}", .failures.len())]
    HandlerFailed {
        /// Name of the published message type.
        message: &'static str,
        /// Every failure recorded during this publish, in invocation order.
        failures: Vec<HandlerFailure>,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use msgbus::PublishError;
    ///
    /// assert_eq!(PublishError::Canceled.as_label(), "publish_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Canceled => "publish_canceled",
            PublishError::HandlerFailed { .. } => "publish_handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PublishError::Canceled => "publish canceled".to_string(),
            PublishError::HandlerFailed { message, failures } => {
                let causes: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
                format!("{} handler(s) failed for {message}: [{}]", failures.len(), causes.join("; "))
            }
        }
    }
}
