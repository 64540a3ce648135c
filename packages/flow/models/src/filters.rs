//! Day-of-week and time-of-day filter enums.
//!
//! Both enums carry the exact wire values the OD feature service uses:
//! day codes `"1"`..`"6"` double as the per-day OD table layer index,
//! and day parts are stored verbatim as coded strings like
//! `"01: 6am (6am-7am)"` in the `Day_Part` column.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Day of week covered by the OD dataset (no Sunday data exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Wire code as used in filter dropdowns and service URLs.
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            Self::Monday => "1",
            Self::Tuesday => "2",
            Self::Wednesday => "3",
            Self::Thursday => "4",
            Self::Friday => "5",
            Self::Saturday => "6",
        }
    }

    /// Layer index of this day's OD table on the county feature service
    /// (`FeatureServer/1` is Monday through `FeatureServer/6` Saturday).
    #[must_use]
    pub const fn od_layer(self) -> u32 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Parses a wire code back into a day.
    #[must_use]
    pub fn from_wire_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Monday),
            "2" => Some(Self::Tuesday),
            "3" => Some(Self::Wednesday),
            "4" => Some(Self::Thursday),
            "5" => Some(Self::Friday),
            "6" => Some(Self::Saturday),
            _ => None,
        }
    }
}

/// Hourly time-of-day period, 6am-7am through 10pm-11pm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum DayPart {
    Am6,
    Am7,
    Am8,
    Am9,
    Am10,
    Am11,
    Pm12,
    Pm1,
    Pm2,
    Pm3,
    Pm4,
    Pm5,
    Pm6,
    Pm7,
    Pm8,
    Pm9,
    Pm10,
}

impl DayPart {
    /// The coded string stored in the OD table's `Day_Part` column.
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            Self::Am6 => "01: 6am (6am-7am)",
            Self::Am7 => "02: 7am (7am-8am)",
            Self::Am8 => "03: 8am (8am-9am)",
            Self::Am9 => "04: 9am (9am-10am)",
            Self::Am10 => "05: 10am (10am-11am)",
            Self::Am11 => "06: 11am (11am-12noon)",
            Self::Pm12 => "07: 12pm (12noon-1pm)",
            Self::Pm1 => "08: 1pm (1pm-2pm)",
            Self::Pm2 => "09: 2pm (2pm-3pm)",
            Self::Pm3 => "10: 3pm (3pm-4pm)",
            Self::Pm4 => "11: 4pm (4pm-5pm)",
            Self::Pm5 => "12: 5pm (5pm-6pm)",
            Self::Pm6 => "13: 6pm (6pm-7pm)",
            Self::Pm7 => "14: 7pm (7pm-8pm)",
            Self::Pm8 => "15: 8pm (8pm-9pm)",
            Self::Pm9 => "16: 9pm (9pm-10pm)",
            Self::Pm10 => "17: 10pm (10pm-11pm)",
        }
    }

    /// Human-readable label for dropdowns and legends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am6 => "6am-7am",
            Self::Am7 => "7am-8am",
            Self::Am8 => "8am-9am",
            Self::Am9 => "9am-10am",
            Self::Am10 => "10am-11am",
            Self::Am11 => "11am-12pm",
            Self::Pm12 => "12pm-1pm",
            Self::Pm1 => "1pm-2pm",
            Self::Pm2 => "2pm-3pm",
            Self::Pm3 => "3pm-4pm",
            Self::Pm4 => "4pm-5pm",
            Self::Pm5 => "5pm-6pm",
            Self::Pm6 => "6pm-7pm",
            Self::Pm7 => "7pm-8pm",
            Self::Pm8 => "8pm-9pm",
            Self::Pm9 => "9pm-10pm",
            Self::Pm10 => "10pm-11pm",
        }
    }

    /// Parses the coded wire string back into a period.
    #[must_use]
    pub fn from_wire_code(code: &str) -> Option<Self> {
        use strum::IntoEnumIterator;

        Self::iter().find(|p| p.wire_code() == code)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn day_wire_codes_round_trip() {
        for day in DayOfWeek::iter() {
            assert_eq!(DayOfWeek::from_wire_code(day.wire_code()), Some(day));
        }
    }

    #[test]
    fn day_od_layer_matches_wire_code() {
        for day in DayOfWeek::iter() {
            assert_eq!(day.od_layer().to_string(), day.wire_code());
        }
    }

    #[test]
    fn day_part_wire_codes_round_trip() {
        for part in DayPart::iter() {
            assert_eq!(DayPart::from_wire_code(part.wire_code()), Some(part));
        }
    }

    #[test]
    fn day_part_covers_seventeen_periods() {
        assert_eq!(DayPart::iter().count(), 17);
    }

    #[test]
    fn day_part_codes_are_zero_padded_and_ordered() {
        let codes: Vec<&str> = DayPart::iter().map(DayPart::wire_code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(DayOfWeek::from_wire_code("7"), None);
        assert_eq!(DayPart::from_wire_code("18: 11pm (11pm-12am)"), None);
    }
}
