//! Route planning module.
//!
//! This module provides:
//! - [`RouteDirection`] - Which way along the highway a query travels
//! - [`RoutePlan`] - Planned route result
//! - [`build_snapshot`] - Sorted `(station, best range)` view of the registry
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Travelling towards larger positions and towards smaller positions share
//! the greedy hop selection but refine the result differently, so each
//! direction is encapsulated in its own [`RoutePlanner`] implementation and
//! [`select_planner`] picks one from the query endpoints.
//!
//! # Example
//!
//! ```
//! use highway_lib::{plan_route, StationMap, VectorConfig};
//!
//! let mut stations = StationMap::default();
//! for (position, range) in [(0, 5), (5, 5), (10, 0)] {
//!     stations.register_station(position);
//!     stations.add_vehicle(position, range);
//! }
//!
//! let plan = plan_route(&stations, 0, 10, &VectorConfig::default())?
//!     .expect("route exists");
//! assert_eq!(plan.steps, vec![0, 5, 10]);
//! # Ok::<(), highway_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AscendingPlanner, DescendingPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::VectorConfig;
use crate::error::{Error, Result};
use crate::route_vector::RouteVector;
use crate::station_map::StationMap;
use crate::Position;

/// Direction of travel along the highway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDirection {
    /// Towards larger positions.
    Ascending,
    /// Towards smaller positions.
    Descending,
}

impl RouteDirection {
    /// Direction of a query from `start` to `goal`.
    pub fn between(start: Position, goal: Position) -> Self {
        if start < goal {
            RouteDirection::Ascending
        } else {
            RouteDirection::Descending
        }
    }
}

impl fmt::Display for RouteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteDirection::Ascending => "ascending",
            RouteDirection::Descending => "descending",
        };
        f.write_str(value)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub start: Position,
    pub goal: Position,
    /// Stations visited in order, `start` and `goal` included.
    pub steps: Vec<Position>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Copy every station and its best range into a vector sorted by position.
pub fn build_snapshot(stations: &StationMap, config: &VectorConfig) -> RouteVector {
    let mut snapshot =
        RouteVector::with_capacity(stations.len().max(config.initial_capacity), *config);
    for station in stations.iter() {
        snapshot.append(station.position(), station.best_range());
    }
    snapshot.sort_by_station();
    snapshot
}

/// Compute the minimum-hop route from `start` to `goal`.
///
/// Returns `Ok(None)` when no sequence of hops connects the two stations.
/// Both endpoints must be registered; otherwise [`Error::UnknownStation`]
/// is returned.
pub fn plan_route(
    stations: &StationMap,
    start: Position,
    goal: Position,
    config: &VectorConfig,
) -> Result<Option<RoutePlan>> {
    for position in [start, goal] {
        if !stations.contains_station(position) {
            return Err(Error::UnknownStation { position });
        }
    }

    if start == goal {
        return Ok(Some(RoutePlan {
            start,
            goal,
            steps: vec![start],
        }));
    }

    let snapshot = build_snapshot(stations, config);
    let start_idx = snapshot.find_index_of_station(start)?;
    let goal_idx = snapshot.find_index_of_station(goal)?;

    let planner = select_planner(start, goal);
    let mut path = RouteVector::new(*config);
    path.append(start, 0);

    if !planner.select_hops(&snapshot, start_idx, goal_idx, &mut path) {
        debug!(
            start,
            goal,
            direction = %planner.direction(),
            stations = snapshot.len(),
            "no route"
        );
        return Ok(None);
    }
    planner.refine(&snapshot, &mut path)?;

    let plan = RoutePlan {
        start,
        goal,
        steps: path.stations(),
    };
    debug!(
        start,
        goal,
        direction = %planner.direction(),
        hops = plan.hop_count(),
        "planned route"
    );
    Ok(Some(plan))
}
