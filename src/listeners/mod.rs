//! Listener-side types: callbacks, per-call options, cleanup handles.
//!
//! ## Contents
//! - [`Callback`] sync/async invocable value with pointer identity
//! - [`SubscribeOptions`] per-call debug/scope/once/tag options
//! - [`Subscription`] cleanup handle returned by subscribe calls
//!
//! The registry record that ties these together is internal to `core`.

mod callback;
mod options;
mod subscription;

pub use callback::{AsyncFn, Callback, SyncFn};
pub use options::SubscribeOptions;
pub use subscription::Subscription;
