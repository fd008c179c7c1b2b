//! Event data model: kinds and payloads.
//!
//! This module groups the value types that flow through the bus:
//!
//! ## Contents
//! - [`EventKind`] opaque event category token (exact-match equality)
//! - [`KindInput`] "one kind or many" input shape for subscribe/publish
//! - [`Payload`] opaque payload passed through to listeners and the bridge
//!
//! Listener records and dispatch state live in `core`; the bridge envelope
//! lives in `bridge`.

mod kind;
mod payload;

pub use kind::{EventKind, KindInput};
pub use payload::Payload;

pub(crate) use payload::payload_type;
