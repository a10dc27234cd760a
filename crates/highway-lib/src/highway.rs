//! Facade tying the station registry and the route planner together.

use tracing::debug;

use crate::config::HighwayConfig;
use crate::error::Result;
use crate::routing::{plan_route, RoutePlan};
use crate::station_map::{Station, StationMap};
use crate::{Position, Range};

/// A highway: the stations registered along it and the vehicles parked at
/// each of them.
///
/// Every query works on the current state; nothing is cached between route
/// plans.
#[derive(Debug, Clone, Default)]
pub struct Highway {
    stations: StationMap,
    config: HighwayConfig,
}

impl Highway {
    pub fn new(config: HighwayConfig) -> Self {
        Self {
            stations: StationMap::new(config.stations, config.vehicles),
            config,
        }
    }

    pub fn config(&self) -> &HighwayConfig {
        &self.config
    }

    /// Read-only access to the registry.
    pub fn stations(&self) -> &StationMap {
        &self.stations
    }

    pub fn station(&self, position: Position) -> Option<&Station> {
        self.stations.find(position)
    }

    /// Register an empty station. Returns `false` if one already exists.
    pub fn register_station(&mut self, position: Position) -> bool {
        let added = self.stations.register_station(position);
        debug!(position, added, "register station");
        added
    }

    /// Register a station stocked with `ranges`.
    ///
    /// The vehicles are only parked when the station is new; registering an
    /// existing position changes nothing and returns `false`.
    pub fn register_station_with_vehicles(
        &mut self,
        position: Position,
        ranges: impl IntoIterator<Item = Range>,
    ) -> bool {
        if !self.register_station(position) {
            return false;
        }
        for range in ranges {
            self.stations.add_vehicle(position, range);
        }
        true
    }

    /// Demolish the station at `position` and scrap its vehicles.
    pub fn remove_station(&mut self, position: Position) -> bool {
        let removed = self.stations.remove_station(position);
        debug!(position, removed, "remove station");
        removed
    }

    /// Park a vehicle at `position`. Returns `false` if no station is there.
    pub fn add_vehicle(&mut self, position: Position, range: Range) -> bool {
        let added = self.stations.add_vehicle(position, range);
        debug!(position, range, added, "add vehicle");
        added
    }

    /// Scrap a vehicle at `position`. Returns `false` if the station or the
    /// vehicle is missing.
    pub fn remove_vehicle(&mut self, position: Position, range: Range) -> bool {
        let removed = self.stations.remove_vehicle(position, range);
        debug!(position, range, removed, "remove vehicle");
        removed
    }

    /// Plan the minimum-hop route from `start` to `goal`.
    ///
    /// `Ok(None)` means no route exists. Naming an unregistered station is
    /// an error.
    pub fn plan_route(&self, start: Position, goal: Position) -> Result<Option<RoutePlan>> {
        plan_route(&self.stations, start, goal, &self.config.snapshot)
    }
}
