//! # Dispatch engine.
//!
//! Delivers a published event to every matching, non-consumed listener and
//! optionally hands it to the cross-context bridge.
//!
//! ## Pass structure (per kind, in input order)
//! ```text
//! 1. debug trace line (kind + payload presence/type)
//! 2. plan: walk the registry under the lock, in insertion order
//!      - skip consumed fire-once records / consumed groups (no state change)
//!      - mark planned records fired; flip fire-once groups' tokens
//!      - mark all records of consumed groups fired (sibling consumption)
//! 3. invoke: run the planned callbacks outside the lock, in order
//!      - sync Err aborts the rest of this publish and propagates
//!      - async callbacks are spawned, never awaited
//! 4. if broadcasting, hand (kind, payload) to the bridge
//! ```
//!
//! Invoking outside the lock makes the bus reentrant: callbacks may freely
//! subscribe, unsubscribe, or publish. The pass runs against its plan
//! snapshot, so mid-pass registry mutation neither revisits nor skips
//! already-planned listeners; records added by a callback wait for the next
//! publish.
//!
//! Group consumption persists in the registry, so in a multi-kind publish of
//! a fire-once group the first matching kind wins and later kinds of the same
//! call deliver nothing for that group.

use crate::core::bus::Bus;
use crate::error::PublishError;
use crate::events::{payload_type, EventKind, KindInput, Payload};
use crate::listeners::Callback;

/// Options for one publish call.
///
/// Unset fields fall back to the bus-wide defaults, read at call time.
#[derive(Clone, Copy, Debug, Default)]
pub struct PublishOptions {
    /// Local override for forwarding to the cross-context bridge.
    pub broadcast: Option<bool>,
    /// Local override for debug trace lines.
    pub debug: Option<bool>,
}

impl PublishOptions {
    /// Overrides bridge forwarding for this call only.
    #[inline]
    pub fn with_broadcast(mut self, on: bool) -> Self {
        self.broadcast = Some(on);
        self
    }

    /// Overrides the debug flag for this call only.
    #[inline]
    pub fn with_debug(mut self, on: bool) -> Self {
        self.debug = Some(on);
        self
    }
}

impl Bus {
    /// Publishes one event to local listeners and, when broadcasting is on
    /// (the bus-wide default unless overridden via [`Bus::publish_with`]),
    /// to peer contexts.
    ///
    /// Publishing a kind with no matching listeners is a safe no-op. A
    /// listener `Err` aborts the remainder of the call and propagates.
    pub fn publish(
        &self,
        kind: impl Into<EventKind>,
        payload: Option<Payload>,
    ) -> Result<(), PublishError> {
        self.publish_with(kind.into(), payload, PublishOptions::default())
    }

    /// Publishes one event for each kind in the list, in order, sharing one
    /// payload.
    pub fn publish_many<I, T>(&self, kinds: I, payload: Option<Payload>) -> Result<(), PublishError>
    where
        I: IntoIterator<Item = T>,
        T: Into<EventKind>,
    {
        let kinds: Vec<EventKind> = kinds.into_iter().map(Into::into).collect();
        self.publish_with(kinds, payload, PublishOptions::default())
    }

    /// Publishes with explicit per-call options.
    pub fn publish_with(
        &self,
        kinds: impl Into<KindInput>,
        payload: Option<Payload>,
        opts: PublishOptions,
    ) -> Result<(), PublishError> {
        let broadcast = opts
            .broadcast
            .unwrap_or_else(|| self.inner.options.broadcast());
        let debug = opts.debug.unwrap_or_else(|| self.inner.options.debug());

        let (kinds, _) = kinds.into().into_parts();
        for kind in kinds {
            if debug {
                tracing::debug!(
                    kind = %kind,
                    payload = payload_type(payload.as_ref()),
                    "publishing event"
                );
            }

            let calls = self.inner.registry.lock().plan(&kind);
            for callback in calls {
                match callback {
                    Callback::Sync(f) => {
                        f(&kind, payload.as_ref()).map_err(|source| PublishError::Listener {
                            kind: kind.clone(),
                            source,
                        })?;
                    }
                    Callback::Async(f) => {
                        let _ = tokio::spawn(f(kind.clone(), payload.clone()));
                    }
                }
            }

            if broadcast {
                self.inner.bridge.send(&kind, payload.as_ref());
            }
        }

        Ok(())
    }
}
