//! # Message model: dispatch keys and type-erased payloads.
//!
//! This module provides the message-related types:
//! - [`Message`] - trait marking a type as publishable, with optional
//!   ancestor projection for polymorphic dispatch
//! - [`Envelope`] - type-erased payload tagged with its `TypeId` and name

mod envelope;
mod message;

pub use envelope::Envelope;
pub use message::Message;
