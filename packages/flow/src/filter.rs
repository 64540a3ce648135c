//! Day-of-week / time-of-day filter state machine.
//!
//! Three states: `NoDay` (initial), `DayOnly`, `DayAndTime`. A time
//! period is only meaningful once a day is set; setting a day (to any
//! value, including re-setting) resets the time period. The caller is
//! responsible for clearing selections on every accepted transition —
//! a selection made under one day's data is not meaningful under
//! another.

use commute_map_flow_models::filters::{DayOfWeek, DayPart};

use crate::FlowError;

/// Which of the three filter states is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// No day selected; queries may not run.
    NoDay,
    /// Day selected, all time periods included.
    DayOnly,
    /// Day and a specific time period selected.
    DayAndTime,
}

/// The currently chosen day-of-week and time-of-day filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    day: Option<DayOfWeek>,
    time_period: Option<DayPart>,
}

impl FilterState {
    /// Creates the initial `NoDay` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            day: None,
            time_period: None,
        }
    }

    /// Sets or clears the day. Any day change resets the time period.
    pub fn set_day(&mut self, day: Option<DayOfWeek>) {
        self.day = day;
        self.time_period = None;
    }

    /// Sets or clears the time period. `None` means "all periods for
    /// the selected day".
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidFilterTransition`] if no day is set.
    pub fn set_time_period(&mut self, period: Option<DayPart>) -> Result<(), FlowError> {
        if self.day.is_none() {
            return Err(FlowError::InvalidFilterTransition);
        }
        self.time_period = period;
        Ok(())
    }

    /// True iff destination queries may run (day is set; the time
    /// period is optional).
    #[must_use]
    pub const fn can_query(&self) -> bool {
        self.day.is_some()
    }

    /// The selected day, if any.
    #[must_use]
    pub const fn day(&self) -> Option<DayOfWeek> {
        self.day
    }

    /// The selected time period, if any.
    #[must_use]
    pub const fn time_period(&self) -> Option<DayPart> {
        self.time_period
    }

    /// The current state-machine phase.
    #[must_use]
    pub const fn phase(&self) -> FilterPhase {
        match (self.day, self.time_period) {
            (None, _) => FilterPhase::NoDay,
            (Some(_), None) => FilterPhase::DayOnly,
            (Some(_), Some(_)) => FilterPhase::DayAndTime,
        }
    }
}
