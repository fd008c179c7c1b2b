//! # Bus: the shared event-bus context object.
//!
//! [`Bus`] is a cheap-clone handle over the shared state every bus operation
//! works against: the listener registry, the runtime option flags, the
//! outbound bridge, and the id counters. Passing clones of one `Bus` around
//! is how otherwise-unrelated call sites find each other; constructing a
//! fresh `Bus` per test gives full isolation.
//!
//! The subscription and dispatch engines live in sibling modules
//! (`core::subscribe`, `core::dispatch`) as further `impl Bus` blocks.
//!
//! ## Properties
//! - **Cloneable**: internally a single `Arc`; all clones share state.
//! - **Synchronous core**: subscribe/publish never await; a tokio runtime is
//!   only needed for bridged buses and async callbacks.
//! - **Self-stopping**: dropping the last handle cancels the bridge's
//!   inbound listener task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::bridge::outbound::Bridge;
use crate::core::builder::BusBuilder;
use crate::core::config::BusConfig;
use crate::core::options::Options;
use crate::core::registry::{GroupId, ListenerId, Registry};

/// Shared state behind every [`Bus`] handle.
pub(crate) struct BusInner {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) options: Options,
    pub(crate) bridge: Bridge,
    pub(crate) next_listener_id: AtomicU64,
    pub(crate) next_group_id: AtomicU64,
    pub(crate) cancel: CancellationToken,
}

impl BusInner {
    pub(crate) fn next_listener_id(&self) -> ListenerId {
        self.next_listener_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn next_group_id(&self) -> GroupId {
        self.next_group_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Drop for BusInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// In-process publish/subscribe event bus with an optional bridge to peer
/// contexts.
///
/// ```
/// use appbus::Bus;
/// use serde_json::json;
///
/// let bus = Bus::new();
/// let sub = bus.subscribe("volume-change", |payload| {
///     let _ = payload;
///     Ok(())
/// });
///
/// bus.publish("volume-change", Some(json!(11)))?;
/// sub.unsubscribe();
/// # Ok::<(), appbus::PublishError>(())
/// ```
#[derive(Clone)]
pub struct Bus {
    pub(crate) inner: Arc<BusInner>,
}

impl Bus {
    /// Creates an unbridged bus with default configuration.
    ///
    /// Works without an async runtime as long as no async callbacks are
    /// registered.
    pub fn new() -> Self {
        BusBuilder::new(BusConfig::default()).build()
    }

    /// Starts building a bus with default configuration.
    pub fn builder() -> BusBuilder {
        BusBuilder::new(BusConfig::default())
    }

    /// Starts building a bus with the given configuration.
    pub fn builder_with(config: BusConfig) -> BusBuilder {
        BusBuilder::new(config)
    }

    pub(crate) fn from_inner(inner: Arc<BusInner>) -> Self {
        Self { inner }
    }

    // ---- Configuration state ----

    /// Whether `publish` forwards to the bridge by default.
    pub fn broadcast_default(&self) -> bool {
        self.inner.options.broadcast()
    }

    /// Flips the broadcast default; affects every subsequent call that does
    /// not override it locally, including publishes from subscriptions
    /// created before the flip.
    pub fn set_broadcast_default(&self, on: bool) {
        self.inner.options.set_broadcast(on);
    }

    /// Whether debug trace lines are emitted by default.
    pub fn debug_default(&self) -> bool {
        self.inner.options.debug()
    }

    /// Flips the debug default.
    pub fn set_debug_default(&self, on: bool) {
        self.inner.options.set_debug(on);
    }

    /// Restores both option flags to their configured initial values.
    ///
    /// Test/process-reset hook; the bus never calls this itself.
    pub fn reset_options(&self) {
        self.inner.options.reset();
    }

    // ---- Registry hooks ----

    /// Discards every listener record and all group consumption state.
    ///
    /// Test/process-reset hook; the bus never calls this itself.
    pub fn reset_registry(&self) {
        self.inner.registry.lock().reset();
    }

    /// Number of live listener records.
    pub fn listener_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    // ---- Bridge introspection ----

    /// True when this bus was built with a transport.
    pub fn bridge_active(&self) -> bool {
        self.inner.bridge.is_active()
    }

    /// Total frames this bus has posted to its transport.
    pub fn bridge_sent_count(&self) -> u64 {
        self.inner.bridge.sent_count()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("listeners", &self.listener_count())
            .field("bridge", &self.inner.bridge)
            .finish()
    }
}
