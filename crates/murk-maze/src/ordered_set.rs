//! An insertion-ordered set with uniform random pick.
//!
//! Used as the candidate frontier during maze generation: membership tests
//! and removals by value, plus `random` for the growth step. Iteration
//! order is insertion order, though generation only relies on set
//! semantics.

use std::collections::HashSet;
use std::hash::Hash;

use rand::{Rng, RngExt};

/// A deduplicated collection with stable order and O(1) membership tests.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Copy + Eq + Hash> OrderedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Add `value` unless already present. Returns whether it was added.
    pub fn insert(&mut self, value: T) -> bool {
        if !self.index.insert(value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Remove `value` if present. Returns whether it was removed.
    pub fn remove(&mut self, value: T) -> bool {
        if !self.index.remove(&value) {
            return false;
        }
        if let Some(i) = self.items.iter().position(|v| *v == value) {
            self.items.remove(i);
        }
        true
    }

    /// Whether `value` is in the set.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.index.contains(&value)
    }

    /// A uniformly random member, or `None` if empty.
    pub fn random(&self, rng: &mut impl Rng) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items[rng.random_range(0..self.items.len())])
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
