//! Maps a trip count to a discrete visual bucket.
//!
//! Called once per rendered destination polygon, so classification is
//! total: zero, negative, NaN, and out-of-range counts all land in the
//! default "No trips" bucket rather than panicking.

use commute_map_flow_models::breaks::{Bucket, ClassBreak, default_breaks};

/// Classifies trip counts against an ordered set of class breaks.
#[derive(Debug, Clone)]
pub struct Classifier {
    breaks: Vec<ClassBreak>,
    no_data: Bucket,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_breaks(), Bucket::no_trips())
    }
}

impl Classifier {
    /// Builds a classifier from ordered, non-overlapping breaks and a
    /// default bucket for unmatched counts.
    #[must_use]
    pub const fn new(breaks: Vec<ClassBreak>, no_data: Bucket) -> Self {
        Self { breaks, no_data }
    }

    /// Returns the first bucket whose range contains `count`, or the
    /// default bucket for zero/negative/non-finite/unmatched counts.
    #[must_use]
    pub fn classify(&self, count: f64) -> &Bucket {
        if !count.is_finite() || count <= 0.0 {
            return &self.no_data;
        }
        self.breaks
            .iter()
            .find(|b| b.contains(count))
            .map_or(&self.no_data, |b| &b.bucket)
    }

    /// The configured class breaks, for legend rendering.
    #[must_use]
    pub fn breaks(&self) -> &[ClassBreak] {
        &self.breaks
    }

    /// The default bucket, for legend rendering.
    #[must_use]
    pub const fn no_data_bucket(&self) -> &Bucket {
        &self.no_data
    }
}
