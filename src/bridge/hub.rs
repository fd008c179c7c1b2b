//! # BridgeHub: in-process fan-out transport.
//!
//! [`BridgeHub`] connects independent `Bus` instances the way a platform
//! broadcast channel connects tabs of one origin. Each call to
//! [`BridgeHub::link`] registers one context and returns a [`HubLink`] that
//! the bus uses as its [`Transport`].
//!
//! ## What it guarantees
//! - `post` returns immediately; delivery is best-effort.
//! - A frame reaches every *other* linked context, never its own origin
//!   (no self-delivery, matching the platform primitive).
//! - Per-context FIFO (bounded mpsc queue order).
//!
//! ## What it does **not** guarantee
//! - No ordering across contexts.
//! - No retries: a full or closed peer queue drops the frame for that peer.
//!
//! ## Diagram
//! ```text
//!    post(frame)
//!        │                      (clone per peer)
//!        ├──────────────► [queue ctx B] ─► inbound listener B
//!        └──────────────► [queue ctx C] ─► inbound listener C
//!     (ctx A's own queue is skipped)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::bridge::transport::Transport;

/// Default per-context queue capacity.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// One linked context's inbound queue.
struct Peer {
    id: u64,
    tx: mpsc::Sender<Value>,
}

struct HubInner {
    peers: Mutex<Vec<Peer>>,
    next_id: AtomicU64,
    capacity: usize,
}

/// In-process transport connecting multiple bus contexts.
///
/// Cheap to clone; all clones share the same peer table.
#[derive(Clone)]
pub struct BridgeHub {
    inner: Arc<HubInner>,
}

impl BridgeHub {
    /// Creates a hub with the default per-context queue capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a hub with the given per-context queue capacity (min 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                peers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Registers a new context and returns its transport handle.
    pub fn link(&self) -> HubLink {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.inner.capacity);
        self.inner.peers.lock().push(Peer { id, tx });
        HubLink {
            id,
            hub: Arc::clone(&self.inner),
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    /// Number of linked contexts.
    pub fn len(&self) -> usize {
        self.inner.peers.lock().len()
    }

    /// True when no context is linked.
    pub fn is_empty(&self) -> bool {
        self.inner.peers.lock().is_empty()
    }
}

impl Default for BridgeHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One context's connection to a [`BridgeHub`].
pub struct HubLink {
    id: u64,
    hub: Arc<HubInner>,
    rx: tokio::sync::Mutex<mpsc::Receiver<Value>>,
}

#[async_trait]
impl Transport for HubLink {
    /// Fans the frame out to every other linked context.
    ///
    /// A peer whose queue is full drops this frame (warn); a peer whose
    /// receiver is gone is unlinked.
    fn post(&self, frame: Value) {
        let mut peers = self.hub.peers.lock();
        peers.retain(|peer| {
            if peer.id == self.id {
                return true;
            }
            match peer.tx.try_send(frame.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(peer = peer.id, "bridge frame dropped: peer queue full");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }

    async fn recv(&self) -> Option<Value> {
        self.rx.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_self_delivery() {
        let hub = BridgeHub::new();
        let a = hub.link();
        let b = hub.link();

        a.post(json!({ "eventKind": "x" }));

        assert_eq!(b.recv().await, Some(json!({ "eventKind": "x" })));
        // A's own queue stays empty.
        assert!(a.rx.lock().await.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_fan_out_reaches_all_peers() {
        let hub = BridgeHub::new();
        let a = hub.link();
        let b = hub.link();
        let c = hub.link();

        a.post(json!({ "eventKind": "x" }));

        assert!(b.recv().await.is_some());
        assert!(c.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_closed_peer_is_unlinked() {
        let hub = BridgeHub::new();
        let a = hub.link();
        let b = hub.link();
        assert_eq!(hub.len(), 2);

        drop(b);
        a.post(json!({ "eventKind": "x" }));
        assert_eq!(hub.len(), 1);
    }

    #[tokio::test]
    async fn test_full_queue_drops_frame() {
        let hub = BridgeHub::with_capacity(1);
        let a = hub.link();
        let b = hub.link();

        a.post(json!({ "eventKind": "first" }));
        a.post(json!({ "eventKind": "second" }));

        assert_eq!(b.recv().await, Some(json!({ "eventKind": "first" })));
        assert!(b.rx.lock().await.try_recv().is_err());
        // The dropped frame did not unlink the peer.
        assert_eq!(hub.len(), 2);
    }
}
