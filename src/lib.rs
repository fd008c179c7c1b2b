//! # appbus
//!
//! **Appbus** is an in-process publish/subscribe event bus for Rust, with an
//! optional bridge that mirrors events across independent, memory-isolated
//! execution contexts.
//!
//! It provides a mutable registry of active listeners, a subscription
//! algorithm with deduplication and fire-once semantics (including fire-once
//! across *groups* of event kinds), a dispatch algorithm with defined
//! ordering and idempotence guarantees, and a cross-context bridge that never
//! creates feedback loops or duplicate delivery.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  producer ──► publish(kind, payload)
//!                  │
//!                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Bus (shared context object)                              │
//! │  - Registry (ordered listener records + group tokens)     │
//! │  - Options (broadcast/debug defaults, resettable)         │
//! │  - Bridge (outbound envelope + sent counter)              │
//! └──────┬──────────────────────────────┬─────────────────────┘
//!        │ insertion-order walk         │ broadcast=true
//!        ▼                              ▼
//!   listener callbacks             Transport (e.g. BridgeHub)
//!   (sync inline / async spawned)       │ frames
//!                                       ▼
//!                              peer context's inbound listener
//!                              ─► verify ─► publish(broadcast=false)
//! ```
//!
//! ### Delivery rules
//! ```text
//! publish(kind):
//!   ├─► listeners of `kind`, in insertion order
//!   │     ├─ fire-once + already fired        ─► skip, no state change
//!   │     ├─ group token consumed             ─► skip, no state change
//!   │     ├─ grouped listener                 ─► callback(kind, payload)
//!   │     └─ bare listener                    ─► callback(payload)
//!   ├─► mark consumed groups' siblings fired (any-kind at-most-once)
//!   └─► bridge.send(kind, payload)  (unless broadcast = false)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types                                  |
//! |-------------------|---------------------------------------------------------------|--------------------------------------------|
//! | **Subscriptions** | Register/deduplicate listeners; scoped, tagged, fire-once.    | [`Bus`], [`SubscribeOptions`], [`Subscription`] |
//! | **Dispatch**      | Ordered delivery, group consumption, error propagation.       | [`PublishOptions`], [`PublishError`]       |
//! | **Bridge**        | Mirror events to peer contexts without loops or duplicates.   | [`Transport`], [`BridgeHub`], [`BridgeMessage`] |
//! | **Configuration** | Bus-wide broadcast/debug defaults with reset hooks.           | [`BusConfig`]                              |
//! | **Errors**        | Typed listener/publish failures with stable labels.           | [`ListenerError`], [`PublishError`]        |
//!
//! ## Example
//! ```rust
//! use appbus::{Bus, BridgeHub};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Two bridged contexts, like two tabs of one origin.
//!     let hub = BridgeHub::new();
//!     let left = Bus::builder().with_transport(hub.link()).build();
//!     let right = Bus::builder().with_transport(hub.link()).build();
//!
//!     let sub = right.subscribe("volume-change", |payload| {
//!         println!("volume is now {payload:?}");
//!         Ok(())
//!     });
//!
//!     // Delivered locally on `left` (no listeners: a safe no-op) and
//!     // mirrored to `right` through the hub.
//!     left.publish("volume-change", Some(json!(11)))?;
//!
//!     tokio::task::yield_now().await;
//!     sub.unsubscribe();
//!     Ok(())
//! }
//! ```

mod bridge;
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use bridge::{BridgeHub, BridgeMessage, HubLink, Transport};
pub use crate::core::{Bus, BusBuilder, BusConfig, PublishOptions};
pub use error::{ListenerError, PublishError};
pub use events::{EventKind, KindInput, Payload};
pub use listeners::{AsyncFn, Callback, SubscribeOptions, Subscription, SyncFn};
