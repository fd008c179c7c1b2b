//! Bus core: shared state, subscription, and dispatch.
//!
//! This module contains the bus itself and the engines that operate on its
//! shared state. The public API from this module is [`Bus`], [`BusBuilder`],
//! [`BusConfig`], and [`PublishOptions`].
//!
//! Internal modules:
//! - [`registry`]: ordered listener records and group consumption state;
//! - [`options`]: runtime default flags (broadcast/debug) with reset;
//! - [`subscribe`]: registration, deduplication, cleanup handles;
//! - [`dispatch`]: the publish walk, failure semantics, bridge handoff;
//! - [`builder`]: assembly, transport attachment, listener spawn.

mod builder;
mod config;
mod options;
mod subscribe;

pub(crate) mod bus;
pub(crate) mod dispatch;
pub(crate) mod registry;

pub use builder::BusBuilder;
pub use bus::Bus;
pub use config::BusConfig;
pub use dispatch::PublishOptions;
