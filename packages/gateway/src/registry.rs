//! Service registry — loads map service definitions from embedded TOML
//! configs.
//!
//! Each `.toml` file in `packages/gateway/services/` is baked into the
//! binary at compile time via [`include_str!`]. Adding a new map
//! variant is as simple as creating a new TOML file and adding it to
//! the list below.

use crate::GatewayError;
use crate::config::{ServiceDefinition, parse_service_toml};

/// TOML configs embedded at compile time.
const SERVICE_TOMLS: &[(&str, &str)] = &[
    (
        "beaver_county",
        include_str!("../services/beaver_county.toml"),
    ),
    ("beaver_falls", include_str!("../services/beaver_falls.toml")),
];

/// Total number of configured services (used in tests).
#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all configured service definitions, parsed from embedded
/// TOML.
///
/// # Errors
///
/// Returns [`GatewayError`] if any embedded config is malformed.
pub fn all_services() -> Result<Vec<ServiceDefinition>, GatewayError> {
    SERVICE_TOMLS
        .iter()
        .map(|(_, raw)| parse_service_toml(raw))
        .collect()
}

/// Looks up one service definition by id.
///
/// # Errors
///
/// Returns [`GatewayError`] if the matching config is malformed.
pub fn service_by_id(id: &str) -> Result<Option<ServiceDefinition>, GatewayError> {
    SERVICE_TOMLS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, raw)| parse_service_toml(raw))
        .transpose()
}

#[cfg(test)]
mod tests {
    use crate::config::OdTableConfig;

    use super::*;

    #[test]
    fn loads_all_services() {
        let services = all_services().unwrap();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique_and_match_keys() {
        let services = all_services().unwrap();
        let mut ids: Vec<&str> = services.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXPECTED_SERVICE_COUNT);

        for (key, _) in SERVICE_TOMLS {
            let def = service_by_id(key).unwrap().unwrap();
            assert_eq!(def.id, *key);
        }
    }

    #[test]
    fn county_is_filtered_per_day() {
        let def = service_by_id("beaver_county").unwrap().unwrap();
        assert!(def.filtered);
        assert!(matches!(def.od_table, OdTableConfig::PerDay));
        assert_eq!(def.fields.day_part.as_deref(), Some("Day_Part"));
    }

    #[test]
    fn falls_is_unfiltered_single_table() {
        let def = service_by_id("beaver_falls").unwrap().unwrap();
        assert!(!def.filtered);
        assert!(matches!(def.od_table, OdTableConfig::Single { layer: 2 }));
        assert_eq!(def.fields.municipality.as_deref(), Some("Municipality"));
    }

    #[test]
    fn unknown_id_returns_none() {
        assert!(service_by_id("nowhere").unwrap().is_none());
    }
}
