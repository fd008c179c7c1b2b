//! Builder for constructing a bus with an optional cross-context bridge.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::bridge::outbound::Bridge;
use crate::bridge::{inbound, Transport};
use crate::core::bus::{Bus, BusInner};
use crate::core::config::BusConfig;
use crate::core::options::Options;
use crate::core::registry::Registry;

/// Builder for constructing a [`Bus`] with optional features.
pub struct BusBuilder {
    config: BusConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl BusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(config: BusConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Bridges the bus over the given transport.
    ///
    /// Published events (with broadcasting on) are mirrored to peer contexts,
    /// and inbound frames are redelivered locally with broadcast suppressed.
    pub fn with_transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Builds the bus.
    ///
    /// When a transport was supplied, this spawns the bridge's inbound
    /// listener and therefore must run inside a tokio runtime. An unbridged
    /// bus spawns nothing.
    pub fn build(self) -> Bus {
        let cancel = CancellationToken::new();
        let bridge = match &self.transport {
            Some(transport) => Bridge::active(Arc::clone(transport)),
            None => Bridge::inactive(),
        };

        let inner = Arc::new(BusInner {
            registry: Mutex::new(Registry::default()),
            options: Options::new(self.config),
            bridge,
            next_listener_id: AtomicU64::new(0),
            next_group_id: AtomicU64::new(0),
            cancel: cancel.clone(),
        });

        if let Some(transport) = self.transport {
            inbound::spawn_listener(Arc::downgrade(&inner), transport, cancel);
        }

        Bus::from_inner(inner)
    }
}
