//! Config-driven map service definition.
//!
//! [`ServiceDefinition`] captures everything unique about one map
//! variant — service URL, layer indices, and attribute field names —
//! in a serializable config struct, so a single controller
//! implementation handles both counties.

use commute_map_flow_models::filters::DayOfWeek;
use serde::Deserialize;

use crate::GatewayError;

/// A complete map service definition for one map variant.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefinition {
    /// Unique identifier (e.g., `"beaver_county"`).
    pub id: String,
    /// Human-readable name (e.g., `"Beaver County"`).
    pub name: String,
    /// Base `FeatureServer` URL, without a layer index.
    pub service_url: String,
    /// Layer index of the clickable block-group polygon layer.
    pub block_group_layer: u32,
    /// Whether this variant exposes day/time filters. When `false`
    /// (Beaver Falls), queries may run without a day selected.
    #[serde(default)]
    pub filtered: bool,
    /// Attribute field names for this service's schema.
    pub fields: FieldMapping,
    /// Where OD trip records live on the service.
    pub od_table: OdTableConfig,
}

/// Attribute field names used in queries.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    /// Block group identifier on the polygon layer (e.g., `"GEOID"`).
    pub block_group: String,
    /// Origin identifier on the OD table.
    pub origin: String,
    /// Destination identifier on the OD table.
    pub destination: String,
    /// Trip count on the OD table.
    pub trips: String,
    /// Time-of-day period column, for filtered services.
    pub day_part: Option<String>,
    /// Municipality name on the polygon layer, where available.
    pub municipality: Option<String>,
}

/// How OD trip records are laid out across service layers.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OdTableConfig {
    /// One OD table layer per day of week; the day's wire code is the
    /// layer index.
    PerDay,
    /// A single OD table layer regardless of day.
    Single {
        /// Layer index of the OD table.
        layer: u32,
    },
}

impl ServiceDefinition {
    /// Resolves the OD table layer for the given day, or `None` when
    /// the layout is per-day and no day is selected.
    #[must_use]
    pub const fn od_layer(&self, day: Option<DayOfWeek>) -> Option<u32> {
        match self.od_table {
            OdTableConfig::PerDay => match day {
                Some(day) => Some(day.od_layer()),
                None => None,
            },
            OdTableConfig::Single { layer } => Some(layer),
        }
    }
}

/// Parses a service definition from TOML.
///
/// # Errors
///
/// Returns [`GatewayError`] if the TOML is malformed.
pub fn parse_service_toml(raw: &str) -> Result<ServiceDefinition, GatewayError> {
    Ok(toml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTY: &str = r#"
        id = "test_county"
        name = "Test County"
        service_url = "https://example.com/FeatureServer"
        block_group_layer = 0
        filtered = true

        [fields]
        block_group = "GEOID"
        origin = "Origin_ID_Text"
        destination = "Destination_Zone_ID"
        trips = "Trips"
        day_part = "Day_Part"

        [od_table]
        type = "per_day"
    "#;

    #[test]
    fn parses_per_day_definition() {
        let def = parse_service_toml(COUNTY).unwrap();
        assert!(def.filtered);
        assert_eq!(def.od_layer(Some(DayOfWeek::Wednesday)), Some(3));
        assert_eq!(def.od_layer(None), None);
    }

    #[test]
    fn parses_single_table_definition() {
        let raw = r#"
            id = "test_falls"
            name = "Test Falls"
            service_url = "https://example.com/FeatureServer"
            block_group_layer = 1

            [fields]
            block_group = "Block_Group"
            origin = "Origin_Block_Group"
            destination = "Destination_Block_Group"
            trips = "Trips"
            municipality = "Municipality"

            [od_table]
            type = "single"
            layer = 2
        "#;
        let def = parse_service_toml(raw).unwrap();
        assert!(!def.filtered);
        assert_eq!(def.od_layer(None), Some(2));
        assert_eq!(def.od_layer(Some(DayOfWeek::Monday)), Some(2));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_service_toml("id = ").is_err());
    }
}
