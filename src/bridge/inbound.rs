//! # Inbound half of the bridge.
//!
//! A spawned listener task drains the transport and redelivers valid frames
//! into the local dispatch engine with broadcast forced off. That override is
//! the sole loop-prevention mechanism: without it, context A's event would be
//! re-broadcast by context B, re-received by A and any third context, and so
//! on indefinitely.
//!
//! ## Rules
//! - Malformed frames (no string `eventKind`) are dropped silently.
//! - A listener error during redelivery is logged and the task keeps
//!   draining; there is no cross-context caller to propagate to.
//! - The task exits when the bus is dropped (cancellation token) or the
//!   transport closes.

use std::sync::{Arc, Weak};

use tokio_util::sync::CancellationToken;

use crate::bridge::message::BridgeMessage;
use crate::bridge::transport::Transport;
use crate::core::bus::{Bus, BusInner};
use crate::core::dispatch::PublishOptions;

/// Spawns the inbound listener for a bridged bus.
///
/// Holds only a weak bus reference so the listener never keeps a dropped bus
/// alive. Call once during bus construction; requires a tokio runtime.
pub(crate) fn spawn_listener(
    bus: Weak<BusInner>,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                frame = transport.recv() => {
                    let Some(frame) = frame else { break };
                    let Some(msg) = BridgeMessage::verify(frame) else { continue };
                    let Some(inner) = bus.upgrade() else { break };

                    let local = Bus::from_inner(inner);
                    let opts = PublishOptions::default().with_broadcast(false);
                    if let Err(err) = local.publish_with(msg.event_kind.as_str(), msg.payload, opts) {
                        tracing::warn!(
                            kind = %err.kind(),
                            error = %err,
                            "listener failed during bridge redelivery"
                        );
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::json;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, timeout};

    use crate::bridge::BridgeHub;
    use crate::core::bus::Bus;
    use crate::core::dispatch::PublishOptions;

    fn bridged_pair(hub: &BridgeHub) -> (Bus, Bus) {
        let left = Bus::builder().with_transport(hub.link()).build();
        let right = Bus::builder().with_transport(hub.link()).build();
        (left, right)
    }

    #[tokio::test]
    async fn test_event_crosses_contexts() {
        let hub = BridgeHub::new();
        let (left, right) = bridged_pair(&hub);

        let (tx, mut rx) = mpsc::unbounded_channel();
        right.subscribe("volume-change", move |payload| {
            let _ = tx.send(payload.cloned());
            Ok(())
        });

        left.publish("volume-change", Some(json!(7))).unwrap();

        let delivered = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("bridge delivery timed out")
            .expect("listener channel closed");
        assert_eq!(delivered, Some(json!(7)));
    }

    #[tokio::test]
    async fn test_inbound_delivery_never_rebroadcasts() {
        let hub = BridgeHub::new();
        let (left, right) = bridged_pair(&hub);

        let (tx, mut rx) = mpsc::unbounded_channel();
        right.subscribe("ping", move |_| {
            let _ = tx.send(());
            Ok(())
        });

        left.publish("ping", None).unwrap();
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("bridge delivery timed out");

        // The receiving side redelivered locally without posting anything.
        assert_eq!(left.bridge_sent_count(), 1);
        assert_eq!(right.bridge_sent_count(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_false_never_reaches_bridge() {
        let hub = BridgeHub::new();
        let (left, right) = bridged_pair(&hub);

        let count = std::sync::Arc::new(AtomicUsize::new(0));
        let sink = std::sync::Arc::clone(&count);
        right.subscribe("ping", move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let opts = PublishOptions::default().with_broadcast(false);
        left.publish_with("ping", None, opts).unwrap();

        sleep(Duration::from_millis(50)).await;
        assert_eq!(left.bridge_sent_count(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_global_broadcast_flag_read_at_call_time() {
        let hub = BridgeHub::new();
        let (left, _right) = bridged_pair(&hub);

        left.set_broadcast_default(false);
        left.publish("ping", None).unwrap();
        assert_eq!(left.bridge_sent_count(), 0);

        left.set_broadcast_default(true);
        left.publish("ping", None).unwrap();
        assert_eq!(left.bridge_sent_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_frames_are_dropped_silently() {
        let hub = BridgeHub::new();
        let rogue = hub.link();
        let bus = Bus::builder().with_transport(hub.link()).build();

        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe("a", move |_| {
            let _ = tx.send(());
            Ok(())
        });

        use crate::bridge::Transport;
        rogue.post(json!({ "eventKind": 42 }));
        rogue.post(json!("garbage"));
        rogue.post(json!({ "eventKind": "a" }));

        // Only the valid frame is redelivered; the listener stays alive.
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("valid frame should still arrive")
            .expect("listener channel closed");
        sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unbridged_bus_broadcasts_nowhere() {
        let bus = Bus::new();
        assert!(!bus.bridge_active());

        bus.publish("ping", None).unwrap();
        assert_eq!(bus.bridge_sent_count(), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_frames() {
        let hub = BridgeHub::new();
        let (left, right) = bridged_pair(&hub);

        left.publish("ping", None).unwrap();
        sleep(Duration::from_millis(50)).await;

        let count = std::sync::Arc::new(AtomicUsize::new(0));
        let sink = std::sync::Arc::clone(&count);
        right.subscribe("ping", move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
