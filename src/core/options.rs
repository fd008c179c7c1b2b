//! # Runtime option flags.
//!
//! [`Options`] holds the two bus-wide default flags as atomics so any handle
//! can flip them at any time. Every subscribe/publish call that does not
//! override locally reads these at call time, so a flip takes effect for all
//! subsequent calls immediately, including calls from subscriptions created
//! before the flip.

use std::sync::atomic::{AtomicBool, Ordering};

use super::config::BusConfig;

/// Mutable bus-wide defaults with a reset-to-initial operation.
#[derive(Debug)]
pub(crate) struct Options {
    broadcast: AtomicBool,
    debug: AtomicBool,
    defaults: BusConfig,
}

impl Options {
    /// Initializes the flags from the configured defaults.
    pub fn new(defaults: BusConfig) -> Self {
        Self {
            broadcast: AtomicBool::new(defaults.broadcast_default),
            debug: AtomicBool::new(defaults.debug_default),
            defaults,
        }
    }

    pub fn broadcast(&self) -> bool {
        self.broadcast.load(Ordering::Relaxed)
    }

    pub fn set_broadcast(&self, on: bool) {
        self.broadcast.store(on, Ordering::Relaxed);
    }

    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub fn set_debug(&self, on: bool) {
        self.debug.store(on, Ordering::Relaxed);
    }

    /// Restores both flags to their configured initial values.
    pub fn reset(&self) {
        self.broadcast
            .store(self.defaults.broadcast_default, Ordering::Relaxed);
        self.debug
            .store(self.defaults.debug_default, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_reset() {
        let opts = Options::new(BusConfig::default());
        assert!(opts.broadcast());
        assert!(!opts.debug());

        opts.set_broadcast(false);
        opts.set_debug(true);
        assert!(!opts.broadcast());
        assert!(opts.debug());

        opts.reset();
        assert!(opts.broadcast());
        assert!(!opts.debug());
    }
}
