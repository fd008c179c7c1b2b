//! # Subscription engine.
//!
//! Registers, deduplicates, and removes listener records. Every entry point
//! funnels into [`Bus::register`]:
//!
//! - Single-kind paths (`subscribe`, `once`, the async variants) create bare
//!   records with no event group; their callbacks receive only the payload.
//! - Multi-kind paths (`subscribe_many`, `once_many`, ...) stamp one fresh
//!   group id onto every record of the call (even a one-element list), and
//!   their callbacks receive the matched kind alongside the payload.
//!
//! ## Deduplication
//! Within one scope, a subscribe call that matches an existing record (same
//! kind plus same explicit tag or same stored callback value) overwrites it
//! in place instead of appending, so subscribing twice never yields two
//! deliveries for one event. See `core::registry` for the exact rule.
//!
//! ## Cleanup
//! Every call returns a [`Subscription`] removing exactly the records the
//! call created or replaced, idempotently.

use std::future::Future;
use std::sync::Arc;

use crate::core::bus::Bus;
use crate::core::registry::NewListener;
use crate::error::ListenerError;
use crate::events::{EventKind, KindInput, Payload};
use crate::listeners::{Callback, SubscribeOptions, Subscription};

impl Bus {
    /// Subscribes to one event kind.
    ///
    /// The callback receives the payload only; it is invoked inline during
    /// `publish`, and an `Err` aborts that publish call.
    pub fn subscribe<F>(&self, kind: impl Into<EventKind>, f: F) -> Subscription
    where
        F: Fn(Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe_with(kind, SubscribeOptions::default(), f)
    }

    /// Subscribes to one event kind with per-call options.
    pub fn subscribe_with<F>(
        &self,
        kind: impl Into<EventKind>,
        opts: SubscribeOptions,
        f: F,
    ) -> Subscription
    where
        F: Fn(Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let callback = Callback::sync(move |_kind, payload| f(payload));
        self.register_records(vec![kind.into()], false, opts, callback)
    }

    /// Subscribes one callback to several event kinds at once, forming an
    /// event group.
    ///
    /// The callback receives the matched kind and the payload. With the
    /// `once` option, the whole group fires at most once across any of its
    /// kinds.
    pub fn subscribe_many<I, T, F>(&self, kinds: I, f: F) -> Subscription
    where
        I: IntoIterator<Item = T>,
        T: Into<EventKind>,
        F: Fn(&EventKind, Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe_many_with(kinds, SubscribeOptions::default(), f)
    }

    /// Subscribes to several event kinds with per-call options.
    pub fn subscribe_many_with<I, T, F>(
        &self,
        kinds: I,
        opts: SubscribeOptions,
        f: F,
    ) -> Subscription
    where
        I: IntoIterator<Item = T>,
        T: Into<EventKind>,
        F: Fn(&EventKind, Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let kinds = kinds.into_iter().map(Into::into).collect();
        self.register_records(kinds, true, opts, Callback::sync(f))
    }

    /// Subscribes to one event kind for at most one delivery.
    pub fn once<F>(&self, kind: impl Into<EventKind>, f: F) -> Subscription
    where
        F: Fn(Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe_with(kind, SubscribeOptions::default().once(), f)
    }

    /// Subscribes to several event kinds for at most one delivery among any
    /// of them.
    pub fn once_many<I, T, F>(&self, kinds: I, f: F) -> Subscription
    where
        I: IntoIterator<Item = T>,
        T: Into<EventKind>,
        F: Fn(&EventKind, Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.subscribe_many_with(kinds, SubscribeOptions::default().once(), f)
    }

    /// Subscribes an async callback to one event kind.
    ///
    /// The future is spawned during `publish` and never awaited, so its own
    /// suspension or failure never affects the dispatch walk. Requires a
    /// tokio runtime at publish time.
    pub fn subscribe_async<F, Fut>(&self, kind: impl Into<EventKind>, f: F) -> Subscription
    where
        F: Fn(Option<Payload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let callback = Callback::asynchronous(move |_kind, payload| f(payload));
        self.register_records(
            vec![kind.into()],
            false,
            SubscribeOptions::default(),
            callback,
        )
    }

    /// Subscribes an async callback to several event kinds, forming an event
    /// group.
    pub fn subscribe_many_async<I, T, F, Fut>(&self, kinds: I, f: F) -> Subscription
    where
        I: IntoIterator<Item = T>,
        T: Into<EventKind>,
        F: Fn(EventKind, Option<Payload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let kinds = kinds.into_iter().map(Into::into).collect();
        self.register_records(
            kinds,
            true,
            SubscribeOptions::default(),
            Callback::asynchronous(f),
        )
    }

    /// General registration entry point: one kind or many, any options, a
    /// prebuilt [`Callback`].
    ///
    /// The input shape decides the group semantics: a list, even of length
    /// one, forms an event group; a bare kind does not. Passing a clone of
    /// an already-registered `Callback` (or reusing a tag) overwrites the
    /// existing record instead of appending.
    pub fn register(
        &self,
        kinds: impl Into<KindInput>,
        opts: SubscribeOptions,
        callback: Callback,
    ) -> Subscription {
        let (kinds, grouped) = kinds.into().into_parts();
        self.register_records(kinds, grouped, opts, callback)
    }

    fn register_records(
        &self,
        kinds: Vec<EventKind>,
        grouped: bool,
        opts: SubscribeOptions,
        callback: Callback,
    ) -> Subscription {
        let debug = opts.debug.unwrap_or_else(|| self.inner.options.debug());
        let group_id = grouped.then(|| self.inner.next_group_id());

        let mut ids = Vec::with_capacity(kinds.len());
        let mut registry = self.inner.registry.lock();
        for kind in kinds {
            let outcome = registry.upsert(NewListener {
                id: self.inner.next_listener_id(),
                kind: kind.clone(),
                callback: callback.clone(),
                scope_key: opts.scope_key.clone(),
                tag: opts.tag.clone(),
                group_id,
                once: opts.once,
            });
            if debug {
                let action = if outcome.replaced {
                    "resubscribed"
                } else {
                    "subscribed"
                };
                tracing::debug!(
                    kind = %kind,
                    scope = scope_label(&opts.scope_key),
                    once = opts.once,
                    "{action} listener"
                );
            }
            ids.push(outcome.id);
        }
        drop(registry);

        Subscription::new(Arc::downgrade(&self.inner), ids)
    }
}

fn scope_label(scope_key: &Option<Arc<str>>) -> &str {
    scope_key.as_deref().unwrap_or("global")
}
