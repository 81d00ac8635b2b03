// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

/// The set of message ids this client has ever handed to the leader, rebuilt
/// from the record store at startup.
///
/// The tracker is local state only: it is not persisted back to disk, and an
/// id is marked used as soon as its `SET` passes validation, before the
/// network call that would confirm it. On a network failure the local view
/// can therefore run ahead of the server. That matches the original client
/// and keeps a rejected id from ever reaching the wire.
#[derive(Debug, Default)]
pub struct UsedIdTracker {
    ids: BTreeSet<u64>,
}

impl UsedIdTracker {
    pub fn new(ids: BTreeSet<u64>) -> Self {
        Self { ids }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Marks an id as used. Idempotent.
    pub fn insert(&mut self, id: u64) {
        self.ids.insert(id);
    }

    /// The highest id seen so far, if any. Shown to the operator as a hint
    /// when a duplicate `SET` is rejected.
    pub fn max_used(&self) -> Option<u64> {
        self.ids.last().copied()
    }

    /// The next id that is safe to use for a fresh `SET`: one past the
    /// current maximum, or 1 for an empty tracker. `None` once the maximum
    /// representable id has been used, so callers reject instead of wrapping.
    pub fn next_available(&self) -> Option<u64> {
        match self.max_used() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_starts_at_one() {
        let tracker = UsedIdTracker::default();
        assert_eq!(tracker.max_used(), None);
        assert_eq!(tracker.next_available(), Some(1));
    }

    #[test]
    fn next_available_is_one_past_max() {
        let mut tracker = UsedIdTracker::default();
        tracker.insert(5);
        tracker.insert(3);
        assert_eq!(tracker.max_used(), Some(5));
        assert_eq!(tracker.next_available(), Some(6));
    }

    #[test]
    fn exhausted_id_space_yields_none_instead_of_wrapping() {
        let mut tracker = UsedIdTracker::default();
        tracker.insert(u64::MAX);
        assert_eq!(tracker.next_available(), None);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut tracker = UsedIdTracker::default();
        tracker.insert(7);
        tracker.insert(7);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.contains(7));
    }

    #[test]
    fn construction_from_scanned_ids() {
        let tracker = UsedIdTracker::new(BTreeSet::from([3, 7]));
        assert!(tracker.contains(3));
        assert!(tracker.contains(7));
        assert!(!tracker.contains(5));
        assert_eq!(tracker.next_available(), Some(8));
    }
}
