//! Combines per-origin trip maps into one destination total mapping.
//!
//! Pure functions, recomputed in full on every change. Data volumes
//! are one municipality's block groups, so incremental updates are not
//! worth their bookkeeping.

use std::collections::BTreeMap;

use commute_map_flow_models::{BlockGroupId, TripData, TripMap};

/// Sums trip counts per destination across every origin's trip map.
#[must_use]
pub fn aggregate(trip_data: &TripData) -> BTreeMap<BlockGroupId, f64> {
    let mut combined: BTreeMap<BlockGroupId, f64> = BTreeMap::new();
    for trip_map in trip_data.values() {
        for (dest_id, trips) in trip_map {
            *combined.entry(dest_id.clone()).or_default() += trips;
        }
    }
    combined
}

/// Total outbound trips for one origin. Zero for an empty map.
#[must_use]
pub fn subtotal(trip_map: &TripMap) -> f64 {
    trip_map.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips(entries: &[(&str, f64)]) -> TripMap {
        entries
            .iter()
            .map(|(id, count)| ((*id).to_string(), *count))
            .collect()
    }

    #[test]
    fn aggregates_overlapping_destinations() {
        let mut trip_data = TripData::new();
        trip_data.insert(
            "150700001".to_string(),
            trips(&[("150700002", 10.0), ("150700003", 5.0)]),
        );
        trip_data.insert("150700004".to_string(), trips(&[("150700002", 7.0)]));

        let combined = aggregate(&trip_data);
        assert_eq!(combined.len(), 2);
        assert!((combined["150700002"] - 17.0).abs() < f64::EPSILON);
        assert!((combined["150700003"] - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregation_is_independent_of_grouping() {
        let a = ("150700001".to_string(), trips(&[("d1", 3.0), ("d2", 4.0)]));
        let b = ("150700005".to_string(), trips(&[("d2", 6.0)]));
        let c = ("150700009".to_string(), trips(&[("d1", 1.0), ("d3", 2.0)]));

        // {A,B} merged with {C} equals {A,B,C} in one pass.
        let mut partial: TripData = [a.clone(), b.clone()].into_iter().collect();
        let mut first = aggregate(&partial);
        partial.insert(c.0.clone(), c.1.clone());
        let incremental = aggregate(&partial);

        let full: TripData = [a, b, c].into_iter().collect();
        let one_pass = aggregate(&full);

        // Merging the {C}-only aggregate into the {A,B} aggregate.
        let c_only: TripData = [("150700009".to_string(), trips(&[("d1", 1.0), ("d3", 2.0)]))]
            .into_iter()
            .collect();
        for (dest, count) in aggregate(&c_only) {
            *first.entry(dest).or_default() += count;
        }

        assert_eq!(first, one_pass);
        assert_eq!(incremental, one_pass);
    }

    #[test]
    fn empty_trip_data_aggregates_to_nothing() {
        assert!(aggregate(&TripData::new()).is_empty());
    }

    #[test]
    fn subtotal_sums_values() {
        let map = trips(&[("d1", 2.5), ("d2", 7.5)]);
        assert!((subtotal(&map) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn subtotal_of_empty_map_is_zero() {
        assert!(subtotal(&TripMap::new()).abs() < f64::EPSILON);
    }
}
