//! Wire types for Kopro push delivery.
//!
//! Defines the JSON payload pushed by the messaging backend, the derived
//! notification fields with their documented defaults, and the envelope
//! used on the local delivery channel between the web wrapper and the
//! push daemon.

pub mod constants;
pub mod envelope;
pub mod payload;

pub use constants::MessageType;
pub use envelope::{Envelope, EnvelopeError};
pub use payload::{ActionDescriptor, NotificationSpec, PushPayload};
