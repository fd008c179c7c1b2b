//! # Outbound half of the bridge.
//!
//! [`Bridge`] is a two-state machine fixed at bus construction:
//!
//! - **inactive** — no transport was supplied; `send` is a no-op.
//! - **active** — a transport exists; `send` wraps the event into a
//!   [`BridgeMessage`] and posts it.
//!
//! The sent-frame counter makes outbound traffic observable: loop-prevention
//! tests assert it stays constant across an inbound redelivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::bridge::message::BridgeMessage;
use crate::bridge::transport::Transport;
use crate::events::{EventKind, Payload};

/// Outbound bridge state: a transport handle, or nothing.
pub(crate) struct Bridge {
    transport: Option<Arc<dyn Transport>>,
    sent: AtomicU64,
}

impl Bridge {
    /// A bridge with no transport; every operation is a no-op.
    pub fn inactive() -> Self {
        Self {
            transport: None,
            sent: AtomicU64::new(0),
        }
    }

    /// A bridge bound to the given transport.
    pub fn active(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            sent: AtomicU64::new(0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.transport.is_some()
    }

    /// Posts one event to peer contexts. No-op when inactive.
    pub fn send(&self, kind: &EventKind, payload: Option<&Payload>) {
        let Some(transport) = &self.transport else {
            return;
        };
        match serde_json::to_value(BridgeMessage::new(kind, payload)) {
            Ok(frame) => {
                transport.post(frame);
                self.sent.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "failed to encode bridge frame");
            }
        }
    }

    /// Total frames posted since construction.
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("active", &self.is_active())
            .field("sent", &self.sent_count())
            .finish()
    }
}
