//! Highway library entry points.
//!
//! This crate keeps a registry of service stations laid out along a single
//! line, the vehicles parked at each of them, and answers minimum-hop route
//! queries between two stations. Higher-level consumers (the CLI) should only
//! depend on the items exported here instead of reimplementing behavior.
//!

pub mod config;
pub mod error;
pub mod highway;
pub mod range_set;
pub mod route_vector;
pub mod routing;
pub mod station_map;
mod table;

/// Position of a station along the highway.
pub type Position = u64;

/// Farthest distance a vehicle can cover in a single hop.
pub type Range = u64;

pub use config::{HighwayConfig, TableConfig, VectorConfig};
pub use error::{Error, Result};
pub use highway::Highway;
pub use range_set::RangeSet;
pub use route_vector::{RouteVector, StationRange};
pub use routing::{plan_route, RouteDirection, RoutePlan};
pub use station_map::{Station, StationMap};
