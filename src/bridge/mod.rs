//! Cross-context bridge: mirror events across memory-isolated contexts.
//!
//! The bridge serializes published events onto a broadcast transport and,
//! symmetrically, redelivers inbound frames into the local dispatch engine
//! with broadcast re-emission suppressed.
//!
//! ## Architecture
//! ```text
//! context A                         context B
//! ─────────                         ─────────
//! publish ─► Bridge::send ─► Transport ─► inbound listener ─► publish
//!            (envelope)      (frames)     (verify, broadcast=false)
//! ```
//!
//! ## Contents
//! - [`Transport`] the platform broadcast primitive seam
//! - [`BridgeMessage`] wire envelope `{ eventKind, payload? }` + validation
//! - [`BridgeHub`] / [`HubLink`] in-process fan-out transport
//! - `outbound` / `inbound` the bus-facing halves (crate-internal)
//!
//! Delivery across contexts is best-effort, at-most-once, and unordered
//! relative to other contexts: a context not yet listening misses the frame.

mod hub;
mod message;
mod transport;

pub(crate) mod inbound;
pub(crate) mod outbound;

pub use hub::{BridgeHub, HubLink};
pub use message::BridgeMessage;
pub use transport::Transport;
