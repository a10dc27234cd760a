//! Growable array of `(station, range)` pairs used for route snapshots and
//! planned paths.

use serde::Serialize;

use crate::config::VectorConfig;
use crate::error::{Error, Result};
use crate::{Position, Range};

/// A station position paired with a range value.
///
/// In a snapshot `range` is the best vehicle range at the station; in a path
/// it is unused and left at `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationRange {
    pub station: Position,
    pub range: Range,
}

/// Growable array whose capacity is multiplied by a fixed factor whenever an
/// append finds it full. Capacity never shrinks.
///
/// Indexing past the end is a contract violation and panics, in the same way
/// slice indexing does.
#[derive(Debug, Clone)]
pub struct RouteVector {
    data: Vec<StationRange>,
    growth_factor: usize,
}

impl Default for RouteVector {
    fn default() -> Self {
        Self::new(VectorConfig::default())
    }
}

impl RouteVector {
    /// Create an empty vector with `config.initial_capacity` slots reserved.
    pub fn new(config: VectorConfig) -> Self {
        Self::with_capacity(config.initial_capacity, config)
    }

    /// Create an empty vector with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, config: VectorConfig) -> Self {
        Self {
            data: Vec::with_capacity(capacity.max(1)),
            growth_factor: config.growth_factor.max(2),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Push a new entry at the end.
    pub fn append(&mut self, station: Position, range: Range) {
        self.set(self.len(), station, range);
    }

    /// Entry at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    pub fn get(&self, idx: usize) -> StationRange {
        assert!(
            idx < self.len(),
            "route vector index {idx} out of range (len {})",
            self.len()
        );
        self.data[idx]
    }

    /// Station position at `idx`. Panics like [`RouteVector::get`].
    pub fn station(&self, idx: usize) -> Position {
        self.get(idx).station
    }

    /// Range value at `idx`. Panics like [`RouteVector::get`].
    pub fn range(&self, idx: usize) -> Range {
        self.get(idx).range
    }

    /// Overwrite the entry at `idx`, or extend by one when `idx == len`.
    ///
    /// # Panics
    ///
    /// Panics if `idx > self.len()`.
    pub fn set(&mut self, idx: usize, station: Position, range: Range) {
        let len = self.len();
        assert!(
            idx <= len,
            "route vector write at {idx} leaves a gap (len {len})"
        );
        let entry = StationRange { station, range };
        if idx < len {
            self.data[idx] = entry;
            return;
        }
        if len == self.capacity() {
            self.grow();
        }
        self.data.push(entry);
    }

    fn grow(&mut self) {
        let target = self.capacity().max(1).saturating_mul(self.growth_factor);
        self.data.reserve_exact(target - self.len());
    }

    /// Index of the first entry for `station`.
    ///
    /// Callers only search for stations they put into the vector, so a miss
    /// is reported as [`Error::StationNotInSnapshot`].
    pub fn find_index_of_station(&self, station: Position) -> Result<usize> {
        self.data
            .iter()
            .position(|entry| entry.station == station)
            .ok_or(Error::StationNotInSnapshot { position: station })
    }

    /// Sort entries by ascending station position.
    pub fn sort_by_station(&mut self) {
        self.data.sort_unstable_by_key(|entry| entry.station);
    }

    /// Distance along the highway between the stations at `a` and `b`.
    pub fn distance_between(&self, a: usize, b: usize) -> u64 {
        self.station(a).abs_diff(self.station(b))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = StationRange> + '_ {
        self.data.iter().copied()
    }

    /// Station positions in order, dropping the range column.
    pub fn stations(&self) -> Vec<Position> {
        self.data.iter().map(|entry| entry.station).collect()
    }
}
