//! Registry of stations keyed by their position along the highway.

use crate::config::TableConfig;
use crate::range_set::RangeSet;
use crate::table::ChainedTable;
use crate::{Position, Range};

/// A registered station and the vehicles parked there.
#[derive(Debug, Clone)]
pub struct Station {
    position: Position,
    /// Allocated on the first vehicle; `None` means no vehicle ever arrived.
    vehicles: Option<RangeSet>,
}

impl Station {
    pub fn position(&self) -> Position {
        self.position
    }

    /// Ranges of the vehicles parked here, if any were ever added.
    pub fn vehicles(&self) -> Option<&RangeSet> {
        self.vehicles.as_ref()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.as_ref().map_or(0, RangeSet::len)
    }

    /// Longest hop available from this station, `0` when it has no vehicle.
    pub fn best_range(&self) -> Range {
        self.vehicles
            .as_ref()
            .and_then(RangeSet::max)
            .unwrap_or(0)
    }
}

/// Map from station position to [`Station`].
///
/// Backed by the same chained table as [`RangeSet`]. Each station exclusively
/// owns its range set, which is dropped together with the station.
#[derive(Debug, Clone)]
pub struct StationMap {
    table: ChainedTable<Station>,
    vehicle_policy: TableConfig,
}

impl Default for StationMap {
    fn default() -> Self {
        Self::new(TableConfig::stations(), TableConfig::vehicles())
    }
}

impl StationMap {
    /// Create an empty map. `vehicle_policy` sizes the range set each station
    /// allocates when its first vehicle arrives.
    pub fn new(station_policy: TableConfig, vehicle_policy: TableConfig) -> Self {
        Self {
            table: ChainedTable::new(station_policy),
            vehicle_policy,
        }
    }

    /// Register a station with no vehicles. Returns `false` if a station
    /// already exists at `position`; its vehicles are left untouched.
    pub fn register_station(&mut self, position: Position) -> bool {
        self.table.insert_with(position, || Station {
            position,
            vehicles: None,
        })
    }

    /// Remove the station at `position` together with all of its vehicles.
    pub fn remove_station(&mut self, position: Position) -> bool {
        self.table.remove(position).is_some()
    }

    pub fn find(&self, position: Position) -> Option<&Station> {
        self.table.get(position)
    }

    pub fn contains_station(&self, position: Position) -> bool {
        self.table.contains_key(position)
    }

    /// Park a vehicle with `range` at `position`.
    ///
    /// Returns `false` only when no station exists there; adding a range the
    /// station already has is a successful no-op.
    pub fn add_vehicle(&mut self, position: Position, range: Range) -> bool {
        let policy = self.vehicle_policy;
        let Some(station) = self.table.get_mut(position) else {
            return false;
        };
        station
            .vehicles
            .get_or_insert_with(|| RangeSet::new(policy))
            .insert(range);
        true
    }

    /// Scrap the vehicle with `range` at `position`.
    ///
    /// Returns `false` when the station is missing or has no such vehicle.
    /// Removing the last vehicle keeps the station registered.
    pub fn remove_vehicle(&mut self, position: Position, range: Range) -> bool {
        self.table
            .get_mut(position)
            .and_then(|station| station.vehicles.as_mut())
            .is_some_and(|vehicles| vehicles.remove(range))
    }

    /// Longest hop available from `position`, or `None` if no station is there.
    pub fn best_range(&self, position: Position) -> Option<Range> {
        self.find(position).map(Station::best_range)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over stations in unspecified order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Station> + '_ {
        self.table.iter().map(|(_, station)| station)
    }
}
