//! Ordered Index - B-tree of post sort keys
//!
//! Holds one [`OrderKey`] per post, ordered most recent first with ties
//! broken by ascending ID. Listing walks this index forward from a resume
//! position.
//!
//! # Performance
//! - Insert / remove / ceiling: O(log n)
//! - Forward walk via [`OrderedIndex::iter_from`]: O(1) amortized per step

use crate::storage::OrderKey;
use std::collections::BTreeSet;
use std::ops::Bound;

/// Ordered set of post keys
#[derive(Debug, Default)]
pub struct OrderedIndex {
    keys: BTreeSet<OrderKey>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key
    ///
    /// Returns `false` if an identical key is already present; the index is
    /// left as it was.
    pub fn insert(&mut self, key: OrderKey) -> bool {
        self.keys.insert(key)
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &OrderKey) -> bool {
        self.keys.remove(key)
    }

    /// Smallest stored key ≥ `key`
    pub fn ceiling(&self, key: &OrderKey) -> Option<&OrderKey> {
        self.keys.range(key..).next()
    }

    /// Smallest stored key (the most recent post)
    pub fn first(&self) -> Option<&OrderKey> {
        self.keys.first()
    }

    /// Successor of `key` in index order
    ///
    /// `key` doesn't have to be stored.
    pub fn next(&self, key: &OrderKey) -> Option<&OrderKey> {
        self.keys
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
    }

    /// In-order iterator starting at the ceiling of `key`
    pub fn iter_from<'a>(&'a self, key: &OrderKey) -> impl Iterator<Item = &'a OrderKey> + 'a {
        self.keys.range(key.clone()..)
    }

    pub fn contains(&self, key: &OrderKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn key(secs: i64, id: &str) -> OrderKey {
        OrderKey::new(at(secs), id)
    }

    #[test]
    fn test_index_creation() {
        let index = OrderedIndex::new();
        assert!(index.is_empty());
        assert!(index.first().is_none());
        assert!(index.ceiling(&key(0, "a")).is_none());
    }

    #[test]
    fn test_first_is_most_recent() {
        let mut index = OrderedIndex::new();
        index.insert(key(1000, "a"));
        index.insert(key(3000, "c"));
        index.insert(key(2000, "b"));

        assert_eq!(index.first(), Some(&key(3000, "c")));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut index = OrderedIndex::new();

        assert!(index.insert(key(1000, "a")));
        assert!(!index.insert(key(1000, "a")));
        assert!(index.insert(key(1000, "b")));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_ceiling() {
        let mut index = OrderedIndex::new();
        index.insert(key(3000, "c"));
        index.insert(key(2000, "b"));
        index.insert(key(1000, "a"));

        // Exact match
        assert_eq!(index.ceiling(&key(2000, "b")), Some(&key(2000, "b")));

        // Between 3000 and 2000: next in order is the 2000 entry
        assert_eq!(index.ceiling(&key(2500, "zzz")), Some(&key(2000, "b")));

        // Same timestamp, smaller ID sorts first
        assert_eq!(index.ceiling(&key(2000, "a")), Some(&key(2000, "b")));

        // Older than everything
        assert!(index.ceiling(&key(500, "a")).is_none());
    }

    #[test]
    fn test_next() {
        let mut index = OrderedIndex::new();
        index.insert(key(2000, "a"));
        index.insert(key(2000, "b"));
        index.insert(key(1000, "a"));

        assert_eq!(index.next(&key(2000, "a")), Some(&key(2000, "b")));
        assert_eq!(index.next(&key(2000, "b")), Some(&key(1000, "a")));
        assert!(index.next(&key(1000, "a")).is_none());
    }

    #[test]
    fn test_remove() {
        let mut index = OrderedIndex::new();
        index.insert(key(1000, "a"));

        assert!(index.remove(&key(1000, "a")));
        assert!(!index.remove(&key(1000, "a")));
        assert!(index.is_empty());
    }

    #[test]
    fn test_iter_from() {
        let mut index = OrderedIndex::new();
        for (secs, id) in [(1000, "a"), (2000, "b"), (3000, "c"), (4000, "d")] {
            index.insert(key(secs, id));
        }

        let ids: Vec<&str> = index
            .iter_from(&key(3000, "c"))
            .map(|k| k.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }
}
