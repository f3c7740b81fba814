//! A generic min-priority queue keyed by external identity.

use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// One heap entry. Reverse-ordered so `BinaryHeap` (a max-heap) pops the
/// smallest priority first; equal priorities pop in insertion order.
#[derive(Clone, Copy, Eq, PartialEq)]
struct HeapEntry<K> {
    key: K,
    priority: i32,
    seq: u64,
}

impl<K: Eq> Ord for HeapEntry<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then(other.seq.cmp(&self.seq))
    }
}

impl<K: Eq> PartialOrd for HeapEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-key bookkeeping. `value` is taken on extraction, which marks the key
/// as spent: any heap entries still referring to it are skipped on pop.
struct Slot<V> {
    priority: i32,
    value: Option<V>,
}

/// A min-priority queue whose entries are addressed by an external key.
///
/// `decrease_priority` uses lazy invalidation: instead of re-heapifying in
/// place, a superseding heap entry is pushed and stale ones (an outdated
/// priority, or a key that was already extracted) are discarded when they
/// surface. This preserves O(log n) operations without true decrease-key.
pub struct PriorityFrontier<K, V> {
    heap: BinaryHeap<HeapEntry<K>>,
    slots: HashMap<K, Slot<V>>,
    seq: u64,
    live: usize,
}

impl<K: Copy + Eq + Hash, V> PriorityFrontier<K, V> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: HashMap::new(),
            seq: 0,
            live: 0,
        }
    }

    /// Add an entry under `key`. Inserting an existing key replaces its
    /// value and priority (a previously extracted key becomes live again).
    pub fn insert(&mut self, key: K, value: V, priority: i32) {
        let slot = self.slots.entry(key).or_insert(Slot {
            priority,
            value: None,
        });
        if slot.value.is_none() {
            self.live += 1;
        }
        slot.priority = priority;
        slot.value = Some(value);
        self.push_entry(key, priority);
    }

    /// Lower the priority of a live entry. Raising it, or addressing an
    /// absent or already-extracted key, is a no-op.
    pub fn decrease_priority(&mut self, key: K, priority: i32) {
        let Some(slot) = self.slots.get_mut(&key) else {
            return;
        };
        if slot.value.is_none() || priority >= slot.priority {
            return;
        }
        slot.priority = priority;
        self.push_entry(key, priority);
    }

    /// Remove and return the minimum-priority entry as `(key, value,
    /// priority)`, or `None` if the queue is empty. A key is never yielded
    /// twice.
    pub fn extract_min(&mut self) -> Option<(K, V, i32)> {
        while let Some(entry) = self.heap.pop() {
            if let Some(slot) = self.slots.get_mut(&entry.key) {
                if slot.priority != entry.priority {
                    continue;
                }
                if let Some(value) = slot.value.take() {
                    self.live -= 1;
                    return Some((entry.key, value, entry.priority));
                }
            }
        }
        None
    }

    /// Number of live (not yet extracted) entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no live entry remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop all entries, keeping allocations.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.seq = 0;
        self.live = 0;
    }

    fn push_entry(&mut self, key: K, priority: i32) {
        self.heap.push(HeapEntry {
            key,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
    }
}

impl<K: Copy + Eq + Hash, V> Default for PriorityFrontier<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut q = PriorityFrontier::new();
        q.insert('a', "A", 5);
        q.insert('b', "B", 2);
        q.insert('c', "C", 8);
        assert_eq!(q.len(), 3);
        assert_eq!(q.extract_min(), Some(('b', "B", 2)));
        assert_eq!(q.extract_min(), Some(('a', "A", 5)));
        assert_eq!(q.extract_min(), Some(('c', "C", 8)));
        assert_eq!(q.extract_min(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn decrease_reorders_extraction() {
        let mut q = PriorityFrontier::new();
        q.insert('a', "A", 5);
        q.insert('b', "B", 2);
        q.insert('c', "C", 8);
        q.decrease_priority('c', 1);
        assert_eq!(q.extract_min(), Some(('c', "C", 1)));
        assert_eq!(q.extract_min(), Some(('b', "B", 2)));
        assert_eq!(q.extract_min(), Some(('a', "A", 5)));
        // The superseded {c, 8} entry must not resurface.
        assert_eq!(q.extract_min(), None);
    }

    #[test]
    fn raising_priority_is_ignored() {
        let mut q = PriorityFrontier::new();
        q.insert('a', "A", 3);
        q.insert('b', "B", 4);
        q.decrease_priority('a', 9);
        assert_eq!(q.extract_min(), Some(('a', "A", 3)));
        assert_eq!(q.extract_min(), Some(('b', "B", 4)));
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut q = PriorityFrontier::new();
        q.insert('x', 0, 7);
        q.insert('y', 1, 7);
        q.insert('z', 2, 7);
        assert_eq!(q.extract_min(), Some(('x', 0, 7)));
        assert_eq!(q.extract_min(), Some(('y', 1, 7)));
        assert_eq!(q.extract_min(), Some(('z', 2, 7)));
    }

    #[test]
    fn decrease_on_extracted_key_is_ignored() {
        let mut q = PriorityFrontier::new();
        q.insert('a', "A", 1);
        q.insert('b', "B", 2);
        assert_eq!(q.extract_min(), Some(('a', "A", 1)));
        q.decrease_priority('a', 0);
        assert_eq!(q.extract_min(), Some(('b', "B", 2)));
        assert_eq!(q.extract_min(), None);
    }

    #[test]
    fn reinsert_after_extraction_revives_key() {
        let mut q = PriorityFrontier::new();
        q.insert('a', "A", 1);
        assert_eq!(q.extract_min(), Some(('a', "A", 1)));
        q.insert('a', "A2", 4);
        assert_eq!(q.extract_min(), Some(('a', "A2", 4)));
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut q = PriorityFrontier::new();
        q.insert(1, (), 1);
        q.insert(2, (), 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.extract_min(), None);
    }
}
