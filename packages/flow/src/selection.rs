//! Selected origins and their per-origin trip maps.
//!
//! Selection is a toggle: clicking a selected origin deselects it and
//! drops its trips. A trip map arriving for an origin that is no
//! longer selected is silently discarded — a late query response must
//! not resurrect a deselected origin.

use std::collections::{BTreeMap, BTreeSet};

use commute_map_flow_models::{BlockGroupId, TripData, TripMap};

/// What a toggle did, so callers know whether to issue a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The origin was added to the selection; its trips are pending.
    Added,
    /// The origin was removed and its trips dropped.
    Removed,
}

/// The set of selected origins plus whatever trip and attribute data
/// has resolved for them.
#[derive(Debug, Default)]
pub struct SelectionStore {
    origins: BTreeSet<BlockGroupId>,
    trip_data: TripData,
    municipalities: BTreeMap<BlockGroupId, String>,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles an origin's membership. Removal also drops its trip map
    /// and attributes.
    pub fn toggle_origin(&mut self, id: &str) -> ToggleAction {
        if self.origins.remove(id) {
            self.trip_data.remove(id);
            self.municipalities.remove(id);
            ToggleAction::Removed
        } else {
            self.origins.insert(id.to_string());
            ToggleAction::Added
        }
    }

    /// Records the resolved trip map for an origin. Ignored when the
    /// origin is no longer selected.
    pub fn record_trip_map(&mut self, id: &str, map: TripMap) {
        if !self.origins.contains(id) {
            log::debug!("Discarding trip map for deselected origin {id}");
            return;
        }
        self.trip_data.insert(id.to_string(), map);
    }

    /// Records the municipality attribute for an origin. Ignored when
    /// the origin is no longer selected.
    pub fn record_municipality(&mut self, id: &str, municipality: String) {
        if !self.origins.contains(id) {
            log::debug!("Discarding municipality for deselected origin {id}");
            return;
        }
        self.municipalities.insert(id.to_string(), municipality);
    }

    /// Empties the selection and all resolved data. Used when the
    /// active filter changes.
    pub fn clear_all(&mut self) {
        self.origins.clear();
        self.trip_data.clear();
        self.municipalities.clear();
    }

    /// True iff nothing is selected. Drives side panel visibility.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// True iff `id` is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.origins.contains(id)
    }

    /// Currently selected origins.
    #[must_use]
    pub const fn origins(&self) -> &BTreeSet<BlockGroupId> {
        &self.origins
    }

    /// Resolved trip maps, keyed by origin.
    #[must_use]
    pub const fn trip_data(&self) -> &TripData {
        &self.trip_data
    }

    /// Municipality for an origin, where resolved.
    #[must_use]
    pub fn municipality(&self, id: &str) -> Option<&str> {
        self.municipalities.get(id).map(String::as_str)
    }
}
