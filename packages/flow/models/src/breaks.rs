//! Class breaks for choropleth bucketing of trip counts.
//!
//! Mirrors the class-breaks renderer the maps use: five labeled ranges
//! from 1 trip up, plus a default "No trips" bucket for zero or
//! unmatched values. Colors are RGBA with a 0..=1 alpha, matching the
//! renderer symbols.

use serde::{Deserialize, Serialize};

/// A discrete visual bucket: the label shown in the legend and the
/// fill color applied to destination polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Legend label (e.g. `"1-5 trips"`).
    pub label: String,
    /// Fill color as `[r, g, b, a]` with `r`/`g`/`b` in 0..=255 and
    /// `a` in 0..=1.
    pub color: [f64; 4],
}

impl Bucket {
    /// The default bucket for zero or unclassifiable trip counts.
    #[must_use]
    pub fn no_trips() -> Self {
        Self {
            label: "No trips".to_string(),
            color: [225.0, 225.0, 225.0, 0.5],
        }
    }
}

/// A labeled numeric range used to bucket a continuous trip count.
///
/// Ranges are inclusive on both ends and must not overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBreak {
    /// Smallest trip count in this bucket.
    pub min: f64,
    /// Largest trip count in this bucket.
    pub max: f64,
    /// The bucket rendered for counts in `min..=max`.
    pub bucket: Bucket,
}

impl ClassBreak {
    /// True when `count` falls inside this break's range.
    #[must_use]
    pub fn contains(&self, count: f64) -> bool {
        count >= self.min && count <= self.max
    }
}

/// The class breaks both map variants render with.
#[must_use]
pub fn default_breaks() -> Vec<ClassBreak> {
    let entry = |min: f64, max: f64, label: &str, color: [f64; 4]| ClassBreak {
        min,
        max,
        bucket: Bucket {
            label: label.to_string(),
            color,
        },
    };

    vec![
        entry(1.0, 5.0, "1-5 trips", [255.0, 241.0, 169.0, 0.7]),
        entry(6.0, 15.0, "6-15 trips", [254.0, 204.0, 92.0, 0.7]),
        entry(16.0, 25.0, "16-25 trips", [253.0, 141.0, 60.0, 0.7]),
        entry(26.0, 50.0, "26-50 trips", [240.0, 59.0, 32.0, 0.7]),
        entry(51.0, 99999.0, ">50 trips", [189.0, 0.0, 38.0, 0.7]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breaks_are_ordered_and_disjoint() {
        let breaks = default_breaks();
        for pair in breaks.windows(2) {
            assert!(pair[0].max < pair[1].min);
        }
    }

    #[test]
    fn default_breaks_start_at_one() {
        let breaks = default_breaks();
        assert!((breaks[0].min - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contains_is_inclusive() {
        let breaks = default_breaks();
        assert!(breaks[0].contains(1.0));
        assert!(breaks[0].contains(5.0));
        assert!(!breaks[0].contains(5.5));
    }
}
