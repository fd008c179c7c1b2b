//! # Bus configuration.
//!
//! Provides [`BusConfig`], the initial values for the bus-wide default flags.
//!
//! Config is used in two ways:
//! 1. **Bus creation**: `Bus::builder_with(config).build()`
//! 2. **Reset baseline**: `reset_options()` restores these values
//!
//! The flags themselves are mutable at runtime through the `Bus` accessors;
//! the config only pins what "default" means for this bus instance.

/// Initial values for the bus-wide default flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Whether `publish` forwards events to the cross-context bridge when the
    /// call does not say otherwise.
    pub broadcast_default: bool,

    /// Whether debug trace lines are emitted when the call does not say
    /// otherwise.
    pub debug_default: bool,
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `broadcast_default = true` (events reach peer contexts)
    /// - `debug_default = false` (quiet unless asked)
    fn default() -> Self {
        Self {
            broadcast_default: true,
            debug_default: false,
        }
    }
}
