//! Set of vehicle ranges parked at a single station.

use crate::config::TableConfig;
use crate::table::ChainedTable;
use crate::Range;

/// Deduplicated set of vehicle ranges.
///
/// Two vehicles with the same range are interchangeable for routing, so the
/// set keeps one copy of each value.
#[derive(Debug, Clone)]
pub struct RangeSet {
    table: ChainedTable<()>,
}

impl Default for RangeSet {
    fn default() -> Self {
        Self::new(TableConfig::vehicles())
    }
}

impl RangeSet {
    /// Create an empty set sized according to `policy`.
    pub fn new(policy: TableConfig) -> Self {
        Self {
            table: ChainedTable::new(policy),
        }
    }

    /// Create an empty set with `capacity` buckets, growing by doubling up to
    /// the default ceiling.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: ChainedTable::with_capacity(capacity, TableConfig::vehicles()),
        }
    }

    /// Add `range`; returns `false` if it was already present.
    pub fn insert(&mut self, range: Range) -> bool {
        self.table.insert_with(range, || ())
    }

    /// Remove `range`; returns `false` if it was not present.
    pub fn remove(&mut self, range: Range) -> bool {
        self.table.remove(range).is_some()
    }

    pub fn contains(&self, range: Range) -> bool {
        self.table.contains_key(range)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of hash buckets currently allocated.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Largest range in the set, if any.
    pub fn max(&self) -> Option<Range> {
        self.iter().max()
    }

    /// Iterate over the ranges in unspecified order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Range> + '_ {
        self.table.iter().map(|(range, _)| range)
    }
}

impl Extend<Range> for RangeSet {
    fn extend<I: IntoIterator<Item = Range>>(&mut self, iter: I) {
        for range in iter {
            self.insert(range);
        }
    }
}

impl FromIterator<Range> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = RangeSet::default();
        assert!(set.insert(30));
        assert!(!set.insert(30));
        assert_eq!(set.len(), 1);
        assert!(set.contains(30));
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: RangeSet = [5, 10, 15].into_iter().collect();

        assert!(set.remove(10));
        assert!(!set.remove(10));
        assert!(!set.remove(99));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(10));
    }

    #[test]
    fn max_tracks_largest_remaining_range() {
        let mut set: RangeSet = [7, 42, 3].into_iter().collect();
        assert_eq!(set.max(), Some(42));

        set.remove(42);
        assert_eq!(set.max(), Some(7));

        set.remove(7);
        set.remove(3);
        assert_eq!(set.max(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn growth_stops_at_default_ceiling() {
        let mut set = RangeSet::with_capacity(4);
        for range in 0..2_000 {
            set.insert(range);
        }

        assert_eq!(set.capacity(), 512);
        assert_eq!(set.len(), 2_000);
        assert!((0..2_000).all(|range| set.contains(range)));
    }

    #[test]
    fn iteration_yields_each_range_once() {
        let set: RangeSet = [1, 2, 3, 2, 1].into_iter().collect();
        let mut ranges: Vec<_> = set.iter().collect();
        ranges.sort_unstable();
        assert_eq!(ranges, vec![1, 2, 3]);
    }
}
