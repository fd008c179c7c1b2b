//! # Listener registry - ordered listener records and group consumption state.
//!
//! The registry owns the live sequence of [`ListenerRecord`]s plus a group
//! table holding one shared consumption token per event group. All mutation
//! goes through its methods, which enforce the structural invariants; callers
//! never touch the sequence directly.
//!
//! ## Architecture
//! ```text
//! subscribe ──► upsert(NewListener) ──► replace-in-place │ append
//! unsubscribe ─► remove(&[id])      ──► retain + group GC
//! publish ────► plan(kind)          ──► ordered walk, marks, call list
//! reset ──────► reset()             ──► empty registry, empty group table
//! ```
//!
//! ## Invariants
//! - At most one record per (scope, kind, dedup identity): a duplicate
//!   subscribe overwrites in place, preserving the record's position.
//! - All records created by one multi-kind subscribe call share exactly one
//!   group id; single-kind records carry none.
//! - `has_fired` is monotonic: nothing resets it short of removing the record
//!   and subscribing fresh.
//! - A group's consumption token, once flipped, permanently suppresses every
//!   record sharing the group id.

use std::collections::HashMap;
use std::sync::Arc;

use crate::events::EventKind;
use crate::listeners::Callback;

/// Identity of one listener record. Fresh per subscribe call, including for
/// records replaced in place, so each call's cleanup owns what it touched.
pub(crate) type ListenerId = u64;

/// Identity of one event group (one multi-kind subscribe call).
pub(crate) type GroupId = u64;

/// One registered (kind, callback, metadata) entry.
#[derive(Clone, Debug)]
pub(crate) struct ListenerRecord {
    /// Record identity used by `Subscription` cleanup.
    pub id: ListenerId,
    /// The event category this record matches.
    pub kind: EventKind,
    /// The invocable value, stored by reference.
    pub callback: Callback,
    /// Owning subscription context; `None` means globally scoped.
    pub scope_key: Option<Arc<str>>,
    /// Explicit deduplication key.
    pub tag: Option<Arc<str>>,
    /// Shared by every record of one multi-kind subscribe call.
    pub group_id: Option<GroupId>,
    /// Eligible for at most one delivery (record- or group-wide).
    pub once: bool,
    /// Set by dispatch on delivery, or on group consumption.
    pub has_fired: bool,
}

/// Shared consumption token for one event group.
#[derive(Debug, Default)]
struct GroupState {
    consumed: bool,
}

/// Fields for a record about to be inserted or overwritten.
pub(crate) struct NewListener {
    pub id: ListenerId,
    pub kind: EventKind,
    pub callback: Callback,
    pub scope_key: Option<Arc<str>>,
    pub tag: Option<Arc<str>>,
    pub group_id: Option<GroupId>,
    pub once: bool,
}

/// What `upsert` did with the new listener.
pub(crate) struct UpsertOutcome {
    /// Identity of the surviving record (always the new call's id).
    pub id: ListenerId,
    /// True when an existing record was overwritten in place.
    pub replaced: bool,
}

/// Ordered listener records plus per-group consumption state.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    records: Vec<ListenerRecord>,
    groups: HashMap<GroupId, GroupState>,
}

impl Registry {
    /// Inserts the listener, overwriting a same-scope duplicate in place.
    ///
    /// Two records are duplicates when their scope keys match (both absent or
    /// both equal), their kinds match, and either both carry the same
    /// explicit tag or their callbacks are the same stored value.
    ///
    /// Overwriting replaces `callback`, `scope_key`, `tag`, and `once` and
    /// assigns the fresh id; position, `group_id`, and `has_fired` survive,
    /// so a consumed fire-once family stays consumed across resubscribes.
    pub fn upsert(&mut self, new: NewListener) -> UpsertOutcome {
        let duplicate = self.records.iter().position(|rec| {
            if rec.scope_key != new.scope_key || rec.kind != new.kind {
                return false;
            }
            let tag_match =
                matches!((&rec.tag, &new.tag), (Some(a), Some(b)) if a == b);
            tag_match || rec.callback.ptr_eq(&new.callback)
        });

        match duplicate {
            Some(index) => {
                let rec = &mut self.records[index];
                rec.id = new.id;
                rec.callback = new.callback;
                rec.scope_key = new.scope_key;
                rec.tag = new.tag;
                rec.once = new.once;
                UpsertOutcome {
                    id: new.id,
                    replaced: true,
                }
            }
            None => {
                if let Some(gid) = new.group_id {
                    self.groups.entry(gid).or_default();
                }
                self.records.push(ListenerRecord {
                    id: new.id,
                    kind: new.kind,
                    callback: new.callback,
                    scope_key: new.scope_key,
                    tag: new.tag,
                    group_id: new.group_id,
                    once: new.once,
                    has_fired: false,
                });
                UpsertOutcome {
                    id: new.id,
                    replaced: false,
                }
            }
        }
    }

    /// Removes the records with the given ids. Ids with no live record are
    /// ignored, which makes repeated cleanup calls safe. Groups with no
    /// remaining members are dropped from the group table.
    pub fn remove(&mut self, ids: &[ListenerId]) {
        self.records.retain(|rec| !ids.contains(&rec.id));
        let records = &self.records;
        self.groups
            .retain(|gid, _| records.iter().any(|rec| rec.group_id == Some(*gid)));
    }

    /// Discards all records and group state.
    pub fn reset(&mut self) {
        self.records.clear();
        self.groups.clear();
    }

    /// Plans one dispatch pass for `kind`: walks the records in insertion
    /// order, applies consumption marks, and returns the callbacks to invoke.
    ///
    /// - Records whose group is consumed, or which are fire-once and already
    ///   fired, are skipped with no state change.
    /// - Every planned record is marked fired; a fire-once grouped record
    ///   also flips its group's consumption token.
    /// - After the walk, every record of a consumed group is marked fired,
    ///   even records of kinds never published, so the group fires at most
    ///   once across any of its kinds.
    pub fn plan(&mut self, kind: &EventKind) -> Vec<Callback> {
        let mut calls = Vec::new();

        for rec in self.records.iter_mut() {
            if rec.kind != *kind {
                continue;
            }

            let group_consumed = rec
                .group_id
                .and_then(|gid| self.groups.get(&gid))
                .is_some_and(|group| group.consumed);
            if group_consumed || (rec.once && rec.has_fired) {
                continue;
            }

            rec.has_fired = true;
            if rec.once {
                if let Some(gid) = rec.group_id {
                    if let Some(group) = self.groups.get_mut(&gid) {
                        group.consumed = true;
                    }
                }
            }
            calls.push(rec.callback.clone());
        }

        for rec in self.records.iter_mut() {
            let consumed = rec
                .group_id
                .and_then(|gid| self.groups.get(&gid))
                .is_some_and(|group| group.consumed);
            if consumed {
                rec.has_fired = true;
            }
        }

        calls
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Read-only view of the live records, in insertion order.
    pub fn records(&self) -> &[ListenerRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listener(id: ListenerId, kind: &str) -> NewListener {
        NewListener {
            id,
            kind: kind.into(),
            callback: Callback::sync(|_, _| Ok(())),
            scope_key: None,
            tag: None,
            group_id: None,
            once: false,
        }
    }

    #[test]
    fn test_append_then_len() {
        let mut reg = Registry::default();
        reg.upsert(listener(0, "a"));
        reg.upsert(listener(1, "b"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_same_tag_overwrites_in_place() {
        let mut reg = Registry::default();
        let tag: Arc<str> = Arc::from("handler");

        let mut first = listener(0, "a");
        first.tag = Some(tag.clone());
        assert!(!reg.upsert(first).replaced);

        reg.upsert(listener(1, "b"));

        let mut second = listener(2, "a");
        second.tag = Some(tag);
        second.once = true;
        let outcome = reg.upsert(second);

        assert!(outcome.replaced);
        assert_eq!(reg.len(), 2);
        // Position preserved, options reflect the second call.
        assert_eq!(reg.records()[0].id, 2);
        assert!(reg.records()[0].once);
    }

    #[test]
    fn test_same_callback_value_overwrites() {
        let mut reg = Registry::default();
        let cb = Callback::sync(|_, _| Ok(()));

        let mut first = listener(0, "a");
        first.callback = cb.clone();
        let mut second = listener(1, "a");
        second.callback = cb;

        reg.upsert(first);
        assert!(reg.upsert(second).replaced);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_different_scopes_do_not_collide() {
        let mut reg = Registry::default();
        let tag: Arc<str> = Arc::from("handler");

        let mut first = listener(0, "a");
        first.tag = Some(tag.clone());
        first.scope_key = Some(Arc::from("left"));
        let mut second = listener(1, "a");
        second.tag = Some(tag);
        second.scope_key = Some(Arc::from("right"));

        reg.upsert(first);
        assert!(!reg.upsert(second).replaced);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_overwrite_keeps_group_and_fired_state() {
        let mut reg = Registry::default();
        let tag: Arc<str> = Arc::from("handler");

        let mut first = listener(0, "a");
        first.tag = Some(tag.clone());
        first.group_id = Some(7);
        first.once = true;
        reg.upsert(first);

        // Consume the group.
        assert_eq!(reg.plan(&"a".into()).len(), 1);
        assert!(reg.records()[0].has_fired);

        let mut second = listener(1, "a");
        second.tag = Some(tag);
        second.once = true;
        reg.upsert(second);

        // Still consumed: the replacement never fires again.
        assert!(reg.records()[0].has_fired);
        assert_eq!(reg.records()[0].group_id, Some(7));
        assert!(reg.plan(&"a".into()).is_empty());
    }

    #[test]
    fn test_remove_is_exact_and_idempotent() {
        let mut reg = Registry::default();
        reg.upsert(listener(0, "a"));
        reg.upsert(listener(1, "a"));

        reg.remove(&[0]);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.records()[0].id, 1);

        reg.remove(&[0]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_drops_empty_groups() {
        let mut reg = Registry::default();
        let mut grouped = listener(0, "a");
        grouped.group_id = Some(3);
        reg.upsert(grouped);

        reg.remove(&[0]);
        assert_eq!(reg.len(), 0);
        assert!(reg.groups.is_empty());
    }

    #[test]
    fn test_plan_skips_consumed_once_records() {
        let mut reg = Registry::default();
        let mut once = listener(0, "a");
        once.once = true;
        reg.upsert(once);
        reg.upsert(listener(1, "a"));

        assert_eq!(reg.plan(&"a".into()).len(), 2);
        // Fire-once record is spent, the plain one keeps firing.
        assert_eq!(reg.plan(&"a".into()).len(), 1);
    }

    #[test]
    fn test_group_consumption_marks_siblings() {
        let mut reg = Registry::default();
        for (id, kind) in [(0, "a"), (1, "b")] {
            let mut rec = listener(id, kind);
            rec.group_id = Some(9);
            rec.once = true;
            reg.upsert(rec);
        }

        assert_eq!(reg.plan(&"a".into()).len(), 1);
        // The sibling on "b" was never invoked but is consumed anyway.
        assert!(reg.records().iter().all(|rec| rec.has_fired));
        assert!(reg.plan(&"b".into()).is_empty());
    }

    #[test]
    fn test_non_once_group_keeps_firing() {
        let mut reg = Registry::default();
        for (id, kind) in [(0, "a"), (1, "b")] {
            let mut rec = listener(id, kind);
            rec.group_id = Some(4);
            reg.upsert(rec);
        }

        assert_eq!(reg.plan(&"a".into()).len(), 1);
        assert_eq!(reg.plan(&"a".into()).len(), 1);
        assert_eq!(reg.plan(&"b".into()).len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut reg = Registry::default();
        let mut rec = listener(0, "a");
        rec.group_id = Some(1);
        reg.upsert(rec);

        reg.reset();
        assert_eq!(reg.len(), 0);
        assert!(reg.groups.is_empty());
    }
}
