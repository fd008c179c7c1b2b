//! # Event kinds: opaque category tokens.
//!
//! [`EventKind`] identifies an event category (e.g. `"volume-change"`).
//! Kinds compare by exact string match and clone cheaply (`Arc<str>` backed),
//! so they can be copied into listener records, dispatch plans, and bridge
//! envelopes without allocation.
//!
//! [`KindInput`] is the "one kind or many" input shape accepted by the
//! general `register` / `publish_with` entry points: a bare kind keeps the
//! single-kind semantics, while a list (even a list of one) carries the
//! event-group semantics.

use std::fmt;
use std::sync::Arc;

/// Opaque token identifying a category of event.
///
/// Equality is exact string match. Construct from anything string-like:
///
/// ```
/// use appbus::EventKind;
///
/// let kind = EventKind::from("volume-change");
/// assert_eq!(kind.as_str(), "volume-change");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKind(Arc<str>);

impl EventKind {
    /// Returns the kind as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl From<&String> for EventKind {
    fn from(s: &String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl From<Arc<str>> for EventKind {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One event kind or an ordered, non-empty collection of kinds.
///
/// The input shape is semantically meaningful: a [`KindInput::List`] marks a
/// multi-kind subscription, whose listener records all share one fresh event
/// group id. A [`KindInput::Single`] never gets a group id.
#[derive(Clone, Debug)]
pub enum KindInput {
    /// A single bare kind (no event group).
    Single(EventKind),
    /// An ordered collection of kinds (forms an event group on subscribe).
    List(Vec<EventKind>),
}

impl KindInput {
    /// Flattens the input into an ordered kind list, remembering whether it
    /// came through the collection path.
    pub(crate) fn into_parts(self) -> (Vec<EventKind>, bool) {
        match self {
            KindInput::Single(kind) => (vec![kind], false),
            KindInput::List(kinds) => (kinds, true),
        }
    }
}

impl From<EventKind> for KindInput {
    fn from(kind: EventKind) -> Self {
        KindInput::Single(kind)
    }
}

impl From<&str> for KindInput {
    fn from(kind: &str) -> Self {
        KindInput::Single(kind.into())
    }
}

impl From<String> for KindInput {
    fn from(kind: String) -> Self {
        KindInput::Single(kind.into())
    }
}

impl<T: Into<EventKind>> From<Vec<T>> for KindInput {
    fn from(kinds: Vec<T>) -> Self {
        KindInput::List(kinds.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<EventKind> + Clone> From<&[T]> for KindInput {
    fn from(kinds: &[T]) -> Self {
        KindInput::List(kinds.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<EventKind>, const N: usize> From<[T; N]> for KindInput {
    fn from(kinds: [T; N]) -> Self {
        KindInput::List(kinds.into_iter().map(Into::into).collect())
    }
}
