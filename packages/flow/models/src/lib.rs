#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Origin-destination trip data types for the commute map.
//!
//! Block groups are the spatial unit for both trip origins and
//! destinations. These types carry no geometry; polygon rendering is
//! handled entirely by the mapping SDK on the client.

pub mod breaks;
pub mod filters;
pub mod view;

use std::collections::BTreeMap;

/// Census block group GEOID (state FIPS + county FIPS + tract + block
/// group, e.g. `"150700001"`). Opaque and stable across sessions.
pub type BlockGroupId = String;

/// Trips from a single origin, keyed by destination block group.
///
/// Counts are non-negative. The county OD dataset stores average daily
/// traffic, so counts may be fractional.
pub type TripMap = BTreeMap<BlockGroupId, f64>;

/// Per-origin trip maps for every selected origin whose query has
/// resolved. An origin can be selected with no entry here (query still
/// in flight) or with an empty [`TripMap`] (query returned zero rows).
pub type TripData = BTreeMap<BlockGroupId, TripMap>;
