//! Separately chained hash table shared by [`RangeSet`](crate::RangeSet) and
//! [`StationMap`](crate::StationMap).
//!
//! Keys are non-negative integers bucketed by `key % capacity`. Each bucket
//! owns its chain as a vector, so there are no links to maintain: unlinking an
//! entry is a `swap_remove` at the [`Slot`] returned by [`ChainedTable::locate`].
//!
//! Before a new key is inserted the table checks its load factor. Once the
//! number of entries reaches the bucket count, and the bucket count is still
//! below the configured ceiling, every entry is moved into a freshly allocated
//! bucket array `growth_factor` times larger. Past the ceiling chains simply
//! get longer.

use std::mem;
use std::slice;

use tracing::trace;

use crate::config::TableConfig;

#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    key: u64,
    value: V,
}

/// Location of an entry: its bucket and its offset inside the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    bucket: usize,
    offset: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct ChainedTable<V> {
    buckets: Vec<Vec<Entry<V>>>,
    len: usize,
    policy: TableConfig,
}

impl<V> ChainedTable<V> {
    /// Create a table sized by `policy.initial_capacity`.
    pub(crate) fn new(policy: TableConfig) -> Self {
        Self::with_capacity(policy.initial_capacity, policy)
    }

    /// Create a table with an explicit starting bucket count.
    pub(crate) fn with_capacity(capacity: usize, policy: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            policy,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, key: u64) -> usize {
        (key % self.buckets.len() as u64) as usize
    }

    /// Find where `key` lives, if present.
    pub(crate) fn locate(&self, key: u64) -> Option<Slot> {
        let bucket = self.bucket_index(key);
        self.buckets[bucket]
            .iter()
            .position(|entry| entry.key == key)
            .map(|offset| Slot { bucket, offset })
    }

    pub(crate) fn contains_key(&self, key: u64) -> bool {
        self.locate(key).is_some()
    }

    pub(crate) fn get(&self, key: u64) -> Option<&V> {
        self.locate(key)
            .map(|slot| &self.buckets[slot.bucket][slot.offset].value)
    }

    pub(crate) fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let slot = self.locate(key)?;
        Some(&mut self.buckets[slot.bucket][slot.offset].value)
    }

    /// Insert `key` with the value built by `make` unless the key is already
    /// present. Returns `true` when a new entry was created.
    pub(crate) fn insert_with(&mut self, key: u64, make: impl FnOnce() -> V) -> bool {
        if self.contains_key(key) {
            return false;
        }
        if self.should_grow() {
            self.grow();
        }
        let bucket = self.bucket_index(key);
        self.buckets[bucket].push(Entry { key, value: make() });
        self.len += 1;
        true
    }

    /// Remove `key`, handing back its value.
    pub(crate) fn remove(&mut self, key: u64) -> Option<V> {
        let slot = self.locate(key)?;
        Some(self.remove_at(slot))
    }

    fn remove_at(&mut self, slot: Slot) -> V {
        let entry = self.buckets[slot.bucket].swap_remove(slot.offset);
        self.len -= 1;
        entry.value
    }

    fn should_grow(&self) -> bool {
        if let Some(ceiling) = self.policy.max_capacity {
            if self.capacity() >= ceiling {
                return false;
            }
        }
        self.len >= self.capacity()
    }

    fn grow(&mut self) {
        let capacity = self.capacity().saturating_mul(self.policy.growth_factor);
        let previous = mem::replace(&mut self.buckets, empty_buckets(capacity));
        for entry in previous.into_iter().flatten() {
            let bucket = self.bucket_index(entry.key);
            self.buckets[bucket].push(entry);
        }
        trace!(entries = self.len, capacity, "rehashed chained table");
    }

    /// Lazy single pass over every entry, bucket by bucket.
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Vec<Entry<V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}

/// Borrowing iterator over `(key, &value)` pairs of a [`ChainedTable`].
#[derive(Debug, Clone)]
pub(crate) struct Iter<'a, V> {
    buckets: slice::Iter<'a, Vec<Entry<V>>>,
    chain: slice::Iter<'a, Entry<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some((entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(initial_capacity: usize, max_capacity: Option<usize>) -> TableConfig {
        TableConfig {
            initial_capacity,
            growth_factor: 2,
            max_capacity,
        }
    }

    #[test]
    fn grows_once_entries_reach_bucket_count() {
        let mut table = ChainedTable::new(policy(4, None));
        for key in 0..4 {
            assert!(table.insert_with(key, || ()));
        }
        assert_eq!(table.capacity(), 4);

        assert!(table.insert_with(4, || ()));
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn duplicate_insert_does_not_trigger_growth() {
        let mut table = ChainedTable::new(policy(2, None));
        assert!(table.insert_with(1, || "a"));
        assert!(table.insert_with(2, || "b"));
        assert!(!table.insert_with(2, || "c"));

        assert_eq!(table.capacity(), 2);
        assert_eq!(table.get(2), Some(&"b"));
    }

    #[test]
    fn rehash_keeps_every_entry_reachable() {
        let mut table = ChainedTable::new(policy(1, None));
        for key in 0..100u64 {
            table.insert_with(key * 7, || key);
        }

        assert_eq!(table.len(), 100);
        assert!(table.capacity() >= 100);
        for key in 0..100u64 {
            assert_eq!(table.get(key * 7), Some(&key));
        }
    }

    #[test]
    fn ceiling_stops_growth_and_chains_lengthen() {
        let mut table = ChainedTable::new(policy(2, Some(4)));
        for key in 0..32 {
            table.insert_with(key, || ());
        }

        assert_eq!(table.capacity(), 4);
        assert_eq!(table.len(), 32);
        assert!((0..32).all(|key| table.contains_key(key)));
    }

    #[test]
    fn removing_from_middle_of_chain_keeps_neighbours() {
        // One bucket: every key shares a chain.
        let mut table = ChainedTable::new(policy(1, Some(1)));
        for key in [10, 20, 30, 40] {
            table.insert_with(key, || key * 2);
        }

        assert_eq!(table.remove(20), Some(40));
        assert_eq!(table.remove(20), None);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(10), Some(&20));
        assert_eq!(table.get(30), Some(&60));
        assert_eq!(table.get(40), Some(&80));
    }

    #[test]
    fn locate_reports_bucket_and_offset() {
        let mut table = ChainedTable::new(policy(4, Some(4)));
        table.insert_with(1, || ());
        table.insert_with(5, || ());

        assert_eq!(
            table.locate(1),
            Some(Slot {
                bucket: 1,
                offset: 0
            })
        );
        assert_eq!(
            table.locate(5),
            Some(Slot {
                bucket: 1,
                offset: 1
            })
        );
        assert_eq!(table.locate(9), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = ChainedTable::new(policy(4, None));
        table.insert_with(3, || 1);
        *table.get_mut(3).expect("present") += 41;
        assert_eq!(table.get(3), Some(&42));
        assert!(table.get_mut(4).is_none());
    }

    #[test]
    fn iteration_visits_each_entry_once_and_restarts() {
        let mut table = ChainedTable::new(policy(4, None));
        for key in [3, 8, 13, 21, 34] {
            table.insert_with(key, || ());
        }

        let mut first: Vec<u64> = table.iter().map(|(key, _)| key).collect();
        first.sort_unstable();
        assert_eq!(first, vec![3, 8, 13, 21, 34]);

        let iter = table.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.count(), 5);
    }

    #[test]
    fn empty_table_iterates_nothing() {
        let table: ChainedTable<()> = ChainedTable::new(policy(4, None));
        assert!(table.is_empty());
        assert_eq!(table.iter().next(), None);
    }
}
