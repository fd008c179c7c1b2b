//! # Per-call subscription options.
//!
//! [`SubscribeOptions`] tunes a single `subscribe` call without touching the
//! bus-wide defaults. All fields are optional; builder-style `with_*` methods
//! keep call sites terse.

use std::sync::Arc;

/// Options for one subscription call.
///
/// ```
/// use appbus::SubscribeOptions;
///
/// let opts = SubscribeOptions::default()
///     .with_scope_key("settings-panel")
///     .with_tag("volume-handler")
///     .once();
/// assert!(opts.once);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SubscribeOptions {
    /// Local debug override; `None` reads the bus-wide default at call time.
    pub debug: Option<bool>,
    /// Identifier of the owning subscription context. Duplicate detection and
    /// bulk removal are scoped to records with the same key; `None` means
    /// globally scoped.
    pub scope_key: Option<Arc<str>>,
    /// When true the listener (or its whole event group) is eligible for
    /// delivery at most once.
    pub once: bool,
    /// Explicit deduplication key: two subscriptions with the same scope,
    /// kind, and tag overwrite each other instead of both staying registered.
    pub tag: Option<Arc<str>>,
}

impl SubscribeOptions {
    /// Overrides the debug flag for this call only.
    #[inline]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Scopes this subscription to the given context key.
    #[inline]
    pub fn with_scope_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.scope_key = Some(key.into());
        self
    }

    /// Attaches an explicit deduplication tag.
    #[inline]
    pub fn with_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Marks the subscription as fire-once.
    #[inline]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}
