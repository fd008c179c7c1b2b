//! # Listener callbacks.
//!
//! [`Callback`] is the invocable value stored in a listener record. Two
//! flavors exist:
//!
//! - **Sync** callbacks run inline during the dispatch walk; their `Err`
//!   aborts the remainder of the publish call and propagates to the caller.
//! - **Async** callbacks are spawned onto the tokio runtime and not awaited,
//!   so their internal suspension never blocks the walk. Their failures stay
//!   inside the spawned task.
//!
//! Every callback receives the matched kind; payload-only subscription paths
//! wrap the user's closure in an adapter that drops the kind argument, so one
//! storage type serves both arities.
//!
//! ## Identity
//! Callbacks compare by `Arc` pointer identity ([`Callback::ptr_eq`]). A
//! cloned `Callback` is the *same* subscription identity; two closures built
//! from identical source are not. Deduplication across independently built
//! closures uses the explicit `tag` subscription option instead.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::ListenerError;
use crate::events::{EventKind, Payload};

/// Boxed synchronous listener function.
pub type SyncFn =
    dyn Fn(&EventKind, Option<&Payload>) -> Result<(), ListenerError> + Send + Sync;

/// Boxed asynchronous listener function. Takes owned arguments because the
/// produced future is spawned and must be `'static`.
pub type AsyncFn = dyn Fn(EventKind, Option<Payload>) -> BoxFuture<'static, ()> + Send + Sync;

/// An invocable listener value, stored by reference (`Arc`) in the registry.
#[derive(Clone)]
pub enum Callback {
    /// Invoked inline during dispatch; errors abort the publish call.
    Sync(Arc<SyncFn>),
    /// Spawned during dispatch; never awaited by the publisher.
    Async(Arc<AsyncFn>),
}

impl Callback {
    /// Wraps a synchronous function taking the matched kind and the payload.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&EventKind, Option<&Payload>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        Callback::Sync(Arc::new(f))
    }

    /// Wraps an asynchronous function taking the matched kind and the payload.
    ///
    /// The future is boxed here so callers can pass plain `async` closures.
    pub fn asynchronous<F, Fut>(f: F) -> Self
    where
        F: Fn(EventKind, Option<Payload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Callback::Async(Arc::new(move |kind, payload| Box::pin(f(kind, payload))))
    }

    /// True when both callbacks are the same stored value (pointer identity).
    pub(crate) fn ptr_eq(&self, other: &Callback) -> bool {
        match (self, other) {
            (Callback::Sync(a), Callback::Sync(b)) => Arc::ptr_eq(a, b),
            (Callback::Async(a), Callback::Async(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Sync(cb) => write!(f, "Callback::Sync({:p})", Arc::as_ptr(cb)),
            Callback::Async(cb) => write!(f, "Callback::Async({:p})", Arc::as_ptr(cb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preserves_identity() {
        let a = Callback::sync(|_, _| Ok(()));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_distinct_closures_have_distinct_identity() {
        let a = Callback::sync(|_, _| Ok(()));
        let b = Callback::sync(|_, _| Ok(()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_sync_and_async_never_compare_equal() {
        let a = Callback::sync(|_, _| Ok(()));
        let b = Callback::asynchronous(|_, _| async {});
        assert!(!a.ptr_eq(&b));
    }
}
