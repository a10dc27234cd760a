//! Tuning knobs for the station registry and route planner.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Bucket count a chained table starts with.
pub const DEFAULT_TABLE_CAPACITY: usize = 4;
/// Multiplier applied to the bucket count when a chained table grows.
pub const DEFAULT_TABLE_GROWTH: usize = 2;
/// Bucket count beyond which per-station range sets stop growing.
pub const DEFAULT_RANGE_SET_CEILING: usize = 512;
/// Minimum capacity of route vectors (snapshots and paths).
pub const DEFAULT_VECTOR_CAPACITY: usize = 8;
/// Multiplier applied to route vector capacity when it fills up.
pub const DEFAULT_VECTOR_GROWTH: usize = 2;

/// Sizing policy for a separately chained hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Number of buckets allocated up front.
    pub initial_capacity: usize,
    /// Factor the bucket count is multiplied by on resize.
    pub growth_factor: usize,
    /// Bucket count at which resizing stops; `None` grows without bound.
    pub max_capacity: Option<usize>,
}

impl TableConfig {
    /// Policy used for the station table: grows without a ceiling.
    pub fn stations() -> Self {
        Self::default()
    }

    /// Policy used for per-station range sets: stops growing at 512 buckets.
    pub fn vehicles() -> Self {
        Self {
            max_capacity: Some(DEFAULT_RANGE_SET_CEILING),
            ..Self::default()
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(invalid(format!("{name}.initial_capacity must be at least 1")));
        }
        if self.growth_factor < 2 {
            return Err(invalid(format!("{name}.growth_factor must be at least 2")));
        }
        if let Some(ceiling) = self.max_capacity {
            if ceiling < self.initial_capacity {
                return Err(invalid(format!(
                    "{name}.max_capacity ({ceiling}) is below initial_capacity ({})",
                    self.initial_capacity
                )));
            }
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_TABLE_CAPACITY,
            growth_factor: DEFAULT_TABLE_GROWTH,
            max_capacity: None,
        }
    }
}

/// Sizing policy for [`RouteVector`](crate::RouteVector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Capacity reserved for a fresh vector, unless more is known to be needed.
    pub initial_capacity: usize,
    /// Factor capacity is multiplied by when the vector is full.
    pub growth_factor: usize,
}

impl VectorConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(invalid("snapshot.initial_capacity must be at least 1"));
        }
        if self.growth_factor < 2 {
            return Err(invalid("snapshot.growth_factor must be at least 2"));
        }
        Ok(())
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_VECTOR_CAPACITY,
            growth_factor: DEFAULT_VECTOR_GROWTH,
        }
    }
}

/// Configuration for a [`Highway`](crate::Highway).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighwayConfig {
    /// Sizing of the station table.
    #[serde(
        default = "TableConfig::stations",
        deserialize_with = "deserialize_stations"
    )]
    pub stations: TableConfig,
    /// Sizing of each station's vehicle range set.
    #[serde(
        default = "TableConfig::vehicles",
        deserialize_with = "deserialize_vehicles"
    )]
    pub vehicles: TableConfig,
    /// Sizing of route snapshots and paths.
    #[serde(default)]
    pub snapshot: VectorConfig,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            stations: TableConfig::stations(),
            vehicles: TableConfig::vehicles(),
            snapshot: VectorConfig::default(),
        }
    }
}

impl HighwayConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every value is inside its accepted domain.
    pub fn validate(&self) -> Result<()> {
        self.stations.validate("stations")?;
        self.vehicles.validate("vehicles")?;
        self.snapshot.validate()
    }
}

/// Fields present in a table section of a configuration file. Anything
/// missing falls back to the defaults of the table being configured, not to
/// [`TableConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableOverrides {
    initial_capacity: Option<usize>,
    growth_factor: Option<usize>,
    /// Outer `None`: key absent. `Some(None)`: explicit `null`, no ceiling.
    #[serde(deserialize_with = "present")]
    max_capacity: Option<Option<usize>>,
}

impl TableOverrides {
    fn apply(self, base: TableConfig) -> TableConfig {
        TableConfig {
            initial_capacity: self.initial_capacity.unwrap_or(base.initial_capacity),
            growth_factor: self.growth_factor.unwrap_or(base.growth_factor),
            max_capacity: self.max_capacity.unwrap_or(base.max_capacity),
        }
    }
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<usize>::deserialize(deserializer).map(Some)
}

fn deserialize_stations<'de, D>(deserializer: D) -> std::result::Result<TableConfig, D::Error>
where
    D: Deserializer<'de>,
{
    TableOverrides::deserialize(deserializer)
        .map(|overrides| overrides.apply(TableConfig::stations()))
}

fn deserialize_vehicles<'de, D>(deserializer: D) -> std::result::Result<TableConfig, D::Error>
where
    D: Deserializer<'de>,
{
    TableOverrides::deserialize(deserializer)
        .map(|overrides| overrides.apply(TableConfig::vehicles()))
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HighwayConfig::default();

        assert_eq!(config.stations.initial_capacity, 4);
        assert_eq!(config.stations.growth_factor, 2);
        assert_eq!(config.stations.max_capacity, None);
        assert_eq!(config.vehicles.max_capacity, Some(512));
        assert_eq!(config.snapshot.initial_capacity, 8);
        assert_eq!(config.snapshot.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = HighwayConfig::from_json_str("{}").expect("empty object parses");
        assert_eq!(config, HighwayConfig::default());
    }

    #[test]
    fn partial_json_overrides_single_field() {
        let config = HighwayConfig::from_json_str(r#"{"stations": {"initial_capacity": 64}}"#)
            .expect("partial config parses");

        assert_eq!(config.stations.initial_capacity, 64);
        assert_eq!(config.stations.growth_factor, 2);
        assert_eq!(config.vehicles, TableConfig::vehicles());
    }

    #[test]
    fn partial_vehicles_keep_range_set_ceiling() {
        let config = HighwayConfig::from_json_str(r#"{"vehicles": {"initial_capacity": 8}}"#)
            .expect("partial config parses");

        assert_eq!(config.vehicles.initial_capacity, 8);
        assert_eq!(config.vehicles.growth_factor, 2);
        assert_eq!(config.vehicles.max_capacity, Some(512));
    }

    #[test]
    fn vehicle_ceiling_can_be_lifted_or_moved() {
        let lifted = HighwayConfig::from_json_str(r#"{"vehicles": {"max_capacity": null}}"#)
            .expect("explicit null parses");
        assert_eq!(lifted.vehicles.max_capacity, None);

        let moved = HighwayConfig::from_json_str(r#"{"vehicles": {"max_capacity": 64}}"#)
            .expect("explicit ceiling parses");
        assert_eq!(moved.vehicles.max_capacity, Some(64));
        assert_eq!(moved.vehicles.initial_capacity, 4);
    }

    #[test]
    fn station_table_ceiling_is_optional() {
        let config = HighwayConfig::from_json_str(r#"{"stations": {"max_capacity": 1024}}"#)
            .expect("station ceiling parses");
        assert_eq!(config.stations.max_capacity, Some(1024));
        assert_eq!(config.stations.initial_capacity, 4);
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = HighwayConfig::from_json_str(r#"{"vehicles": {"initial_capacity": 0}}"#)
            .expect_err("zero capacity rejected");
        assert!(format!("{err}").contains("vehicles.initial_capacity"));
    }

    #[test]
    fn rejects_growth_factor_below_two() {
        let err = HighwayConfig::from_json_str(r#"{"snapshot": {"growth_factor": 1}}"#)
            .expect_err("non-growing vector rejected");
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_ceiling_below_initial_capacity() {
        let json = r#"{"stations": {"initial_capacity": 16, "max_capacity": 8}}"#;
        let err = HighwayConfig::from_json_str(json).expect_err("ceiling below start rejected");
        assert!(format!("{err}").contains("max_capacity (8)"));
    }

    #[test]
    fn malformed_json_surfaces_json_error() {
        let err = HighwayConfig::from_json_str("{not json").expect_err("malformed");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("highway.json");
        std::fs::write(&path, r#"{"snapshot": {"initial_capacity": 64}}"#).expect("write config");

        let config = HighwayConfig::from_path(&path).expect("valid config");
        assert_eq!(config.snapshot.initial_capacity, 64);
        assert_eq!(config.vehicles, TableConfig::vehicles());
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = HighwayConfig::from_path(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, Error::Io(_)));
    }
}
