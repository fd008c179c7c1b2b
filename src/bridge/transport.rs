//! # Transport seam for cross-context delivery.
//!
//! [`Transport`] abstracts the platform's structured broadcast primitive: a
//! channel that carries JSON frames between memory-isolated contexts. The
//! bus never assumes one exists; a bus built without a transport keeps its
//! bridge permanently inactive and every bridge operation is a no-op.
//!
//! The in-process implementation is [`BridgeHub`](crate::bridge::BridgeHub);
//! tests plug in probes to observe outbound traffic.

use async_trait::async_trait;
use serde_json::Value;

/// A structured cross-context broadcast primitive.
///
/// Frames are raw JSON values: the receiving side validates them before
/// redelivery and silently drops anything malformed, so implementations can
/// forward traffic verbatim without inspecting it.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Posts a frame to peer contexts. Fire-and-forget: delivery is
    /// best-effort and never blocks the publisher.
    fn post(&self, frame: Value);

    /// Receives the next inbound frame from peer contexts.
    ///
    /// Returns `None` when the channel is closed, which stops the bridge's
    /// inbound listener.
    async fn recv(&self) -> Option<Value>;
}
