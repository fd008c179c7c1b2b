//! # Subscription cleanup handle.
//!
//! [`Subscription`] is returned by every subscribe call. It remembers the
//! records that call created or replaced (by record id, not by re-matching
//! kind/callback) and removes exactly those on [`Subscription::unsubscribe`].
//!
//! ## Rules
//! - `unsubscribe()` is idempotent: repeated calls are safe no-ops.
//! - Dropping a `Subscription` without calling `unsubscribe` leaves the
//!   listeners registered; cleanup is explicit.
//! - The handle holds only a weak reference to the bus, so it never keeps a
//!   dropped bus alive.

use std::sync::Weak;

use crate::core::bus::BusInner;
use crate::core::registry::ListenerId;

/// Handle that removes the records created by one subscribe call.
#[derive(Debug)]
pub struct Subscription {
    bus: Weak<BusInner>,
    ids: Vec<ListenerId>,
}

impl Subscription {
    pub(crate) fn new(bus: Weak<BusInner>, ids: Vec<ListenerId>) -> Self {
        Self { bus, ids }
    }

    /// Removes exactly the listener records this subscription owns.
    ///
    /// Safe to call more than once; later calls find nothing to remove.
    /// A no-op when the bus has already been dropped.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.registry.lock().remove(&self.ids);
        }
    }

    /// Number of listener records this subscription created or replaced.
    pub fn listener_count(&self) -> usize {
        self.ids.len()
    }
}
