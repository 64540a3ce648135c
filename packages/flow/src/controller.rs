//! Event-driven map controller.
//!
//! Wires UI events to the feature query gateway and the selection
//! store: click → filter gate check → tagged query → record →
//! recompute → view state for the presentation sink.
//!
//! Queries resolve asynchronously, so every issued query carries the
//! epoch of the filter state it was built under. Completion discards
//! the result when the epoch no longer matches (a filter change
//! invalidated it) or the origin was deselected meanwhile. There is no
//! cancellation, retry, or timeout — fire-and-discard is sufficient.

use commute_map_flow_models::filters::{DayOfWeek, DayPart};
use commute_map_flow_models::view::{
    DestinationShade, OriginSummary, PanelView, Tooltip, ViewState,
};
use commute_map_flow_models::{BlockGroupId, TripMap};
use commute_map_gateway::config::ServiceDefinition;
use commute_map_gateway::predicate::Predicate;
use commute_map_gateway::{FeatureQuery, FeatureRecord};

use crate::classify::Classifier;
use crate::filter::FilterState;
use crate::selection::{SelectionStore, ToggleAction};
use crate::{FlowError, aggregate};

/// What a pending query's result should be recorded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// OD table rows: destination id + trip count per record.
    Trips,
    /// Block-group layer attributes for the origin (municipality).
    OriginAttributes,
}

/// A query the controller wants executed against the gateway.
///
/// Tagged with the epoch active when it was issued; the tag is checked
/// again on completion before any state mutates.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    /// The origin this query was issued for.
    pub origin: BlockGroupId,
    /// Service layer to query.
    pub layer: u32,
    /// Structured filter, rendered to `where` syntax at the boundary.
    pub predicate: Predicate,
    /// Attribute fields to request.
    pub out_fields: Vec<String>,
    /// How to record the result.
    pub kind: QueryKind,
    epoch: u64,
}

/// Outcome of an origin click, before any query has run.
#[derive(Debug)]
pub enum ClickOutcome {
    /// The filter gate blocked the click (no day selected on a
    /// filtered service). The sink should highlight the required
    /// filter controls.
    FilterRequired,
    /// The origin was deselected; its data is gone and the view should
    /// be re-rendered.
    Deselected,
    /// The origin was selected; run these queries and apply their
    /// results.
    Selected(Vec<PendingQuery>),
}

/// Drives one map variant: selection, filters, aggregation, and view
/// state, against a config-defined feature service.
pub struct MapController {
    service: ServiceDefinition,
    classifier: Classifier,
    store: SelectionStore,
    filter: FilterState,
    epoch: u64,
}

impl MapController {
    /// Creates a controller for a service with the default class
    /// breaks.
    #[must_use]
    pub fn new(service: ServiceDefinition) -> Self {
        Self::with_classifier(service, Classifier::default())
    }

    /// Creates a controller with custom class breaks.
    #[must_use]
    pub fn with_classifier(service: ServiceDefinition, classifier: Classifier) -> Self {
        Self {
            service,
            classifier,
            store: SelectionStore::new(),
            filter: FilterState::new(),
            epoch: 0,
        }
    }

    /// The service definition this controller drives.
    #[must_use]
    pub const fn service(&self) -> &ServiceDefinition {
        &self.service
    }

    /// The current filter state.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The selection store (read-only; mutate through events).
    #[must_use]
    pub const fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Sets or clears the day filter. Clears all selections and
    /// invalidates in-flight queries.
    pub fn set_day(&mut self, day: Option<DayOfWeek>) {
        self.filter.set_day(day);
        self.invalidate();
    }

    /// Sets or clears the time period filter. On success, clears all
    /// selections and invalidates in-flight queries.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidFilterTransition`] if no day is
    /// set; state is unchanged and in-flight queries stay valid.
    pub fn set_time_period(&mut self, period: Option<DayPart>) -> Result<(), FlowError> {
        self.filter.set_time_period(period)?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.store.clear_all();
        self.epoch += 1;
        log::debug!(
            "{}: filter changed, selections cleared (epoch {})",
            self.service.id,
            self.epoch
        );
    }

    /// True iff destination queries may run right now.
    #[must_use]
    pub const fn can_query(&self) -> bool {
        !self.service.filtered || self.filter.can_query()
    }

    /// Handles a click on a block group polygon.
    ///
    /// Toggles selection and, on select, returns the tagged queries to
    /// run: the OD trip query, plus a block-group attribute query when
    /// the service defines a municipality field.
    pub fn origin_click(&mut self, geoid: &str) -> ClickOutcome {
        if !self.can_query() {
            log::warn!(
                "{}: ignoring click on {geoid}, no day of week selected",
                self.service.id
            );
            return ClickOutcome::FilterRequired;
        }

        match self.store.toggle_origin(geoid) {
            ToggleAction::Removed => ClickOutcome::Deselected,
            ToggleAction::Added => match self.build_queries(geoid) {
                Some(queries) => ClickOutcome::Selected(queries),
                None => ClickOutcome::FilterRequired,
            },
        }
    }

    fn build_queries(&self, geoid: &str) -> Option<Vec<PendingQuery>> {
        let day = if self.service.filtered {
            self.filter.day()
        } else {
            None
        };
        let Some(od_layer) = self.service.od_layer(day) else {
            // Unreachable when can_query() held, but never panic on a
            // click.
            log::error!("{}: no OD table layer for day {day:?}", self.service.id);
            return None;
        };

        let fields = &self.service.fields;
        let mut predicate = Predicate::eq(&fields.origin, geoid);
        if let (Some(day_part_field), Some(period)) = (&fields.day_part, self.filter.time_period())
        {
            predicate = predicate.and(Predicate::eq(day_part_field, period.wire_code()));
        }

        let mut queries = vec![PendingQuery {
            origin: geoid.to_string(),
            layer: od_layer,
            predicate,
            out_fields: vec![fields.destination.clone(), fields.trips.clone()],
            kind: QueryKind::Trips,
            epoch: self.epoch,
        }];

        if let Some(municipality_field) = &fields.municipality {
            queries.push(PendingQuery {
                origin: geoid.to_string(),
                layer: self.service.block_group_layer,
                predicate: Predicate::eq(&fields.block_group, geoid),
                out_fields: vec![fields.block_group.clone(), municipality_field.clone()],
                kind: QueryKind::OriginAttributes,
                epoch: self.epoch,
            });
        }

        Some(queries)
    }

    /// Applies a resolved query's records. Stale results — epoch
    /// mismatch or deselected origin — are discarded without touching
    /// state.
    pub fn apply_records(&mut self, query: &PendingQuery, records: &[FeatureRecord]) {
        if query.epoch != self.epoch {
            log::debug!(
                "{}: discarding stale result for origin {} (epoch {} != {})",
                self.service.id,
                query.origin,
                query.epoch,
                self.epoch
            );
            return;
        }
        if !self.store.is_selected(&query.origin) {
            log::debug!(
                "{}: discarding result for deselected origin {}",
                self.service.id,
                query.origin
            );
            return;
        }

        match query.kind {
            QueryKind::Trips => {
                if records.is_empty() {
                    log::info!(
                        "{}: no destinations found for origin {}",
                        self.service.id,
                        query.origin
                    );
                }
                let trip_map = self.parse_trip_records(records);
                self.store.record_trip_map(&query.origin, trip_map);
            }
            QueryKind::OriginAttributes => {
                if let Some(municipality) = self.parse_municipality(records) {
                    self.store.record_municipality(&query.origin, municipality);
                }
            }
        }
    }

    /// Runs one pending query against the gateway and applies the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Query`] if the gateway fails; state is
    /// left unchanged.
    pub async fn run_query(
        &mut self,
        gateway: &dyn FeatureQuery,
        query: PendingQuery,
    ) -> Result<(), FlowError> {
        let where_clause = query.predicate.to_where_clause();
        let out_fields: Vec<&str> = query.out_fields.iter().map(String::as_str).collect();
        let records = gateway
            .query_features(query.layer, &where_clause, &out_fields)
            .await?;
        self.apply_records(&query, &records);
        Ok(())
    }

    /// Convenience click handler: toggles, runs whatever queries the
    /// toggle produced, and swallows query failures (logged; the view
    /// keeps showing its last-good state).
    ///
    /// Returns `None` when the filter gate blocked the click.
    pub async fn handle_click(
        &mut self,
        gateway: &dyn FeatureQuery,
        geoid: &str,
    ) -> Option<ToggleAction> {
        match self.origin_click(geoid) {
            ClickOutcome::FilterRequired => None,
            ClickOutcome::Deselected => Some(ToggleAction::Removed),
            ClickOutcome::Selected(queries) => {
                for query in queries {
                    if let Err(e) = self.run_query(gateway, query).await {
                        log::error!(
                            "{}: query for origin {geoid} failed: {e}",
                            self.service.id
                        );
                    }
                }
                Some(ToggleAction::Added)
            }
        }
    }

    /// Builds the full redraw state for the presentation sink.
    ///
    /// Destinations that are themselves selected origins render as
    /// origin highlights, not shaded destinations. The panel is absent
    /// iff nothing is selected.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let combined = aggregate::aggregate(self.store.trip_data());

        let destinations: Vec<DestinationShade> = combined
            .into_iter()
            .filter(|(geoid, _)| !self.store.is_selected(geoid))
            .map(|(geoid, trips)| DestinationShade {
                bucket: self.classifier.classify(trips).clone(),
                geoid,
                trips,
            })
            .collect();

        let panel = if self.store.is_empty() {
            None
        } else {
            let origins = self
                .store
                .origins()
                .iter()
                .map(|geoid| OriginSummary {
                    geoid: geoid.clone(),
                    municipality: self.store.municipality(geoid).map(str::to_string),
                    total_trips: self
                        .store
                        .trip_data()
                        .get(geoid)
                        .map_or(0.0, aggregate::subtotal),
                })
                .collect();
            Some(PanelView { origins })
        };

        ViewState {
            highlighted_origins: self.store.origins().iter().cloned().collect(),
            destinations,
            panel,
        }
    }

    /// Tooltip content for the polygon under the pointer.
    ///
    /// `None` when nothing is selected, when the polygon is itself a
    /// selected origin, or when no trips flow into it.
    #[must_use]
    pub fn tooltip_for(&self, geoid: &str) -> Option<Tooltip> {
        if self.store.is_empty() || self.store.is_selected(geoid) {
            return None;
        }

        let total_trips: f64 = self
            .store
            .trip_data()
            .values()
            .filter_map(|trip_map| trip_map.get(geoid))
            .sum();

        (total_trips > 0.0).then(|| Tooltip {
            geoid: geoid.to_string(),
            total_trips,
        })
    }

    fn parse_trip_records(&self, records: &[FeatureRecord]) -> TripMap {
        let fields = &self.service.fields;
        let mut trip_map = TripMap::new();

        for record in records {
            let dest_id = match attr_string(record, &fields.destination) {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("{}: skipping OD record: {e}", self.service.id);
                    continue;
                }
            };
            let trips = match attr_number(record, &fields.trips) {
                Ok(n) => n,
                Err(e) => {
                    log::warn!("{}: skipping OD record for {dest_id}: {e}", self.service.id);
                    continue;
                }
            };
            if trips < 0.0 {
                log::warn!(
                    "{}: skipping negative trip count {trips} for {dest_id}",
                    self.service.id
                );
                continue;
            }
            trip_map.insert(dest_id, trips);
        }

        trip_map
    }

    fn parse_municipality(&self, records: &[FeatureRecord]) -> Option<String> {
        let field = self.service.fields.municipality.as_ref()?;
        let record = records.first()?;
        match attr_string(record, field) {
            Ok(municipality) => Some(municipality),
            Err(e) => {
                log::warn!("{}: no municipality attribute: {e}", self.service.id);
                None
            }
        }
    }
}

/// Reads an attribute as a string, accepting numeric identifiers
/// (Beaver County's `Destination_Zone_ID` is numeric).
fn attr_string(record: &FeatureRecord, field: &str) -> Result<String, FlowError> {
    let value = record.get(field).ok_or_else(|| FlowError::MissingAttribute {
        field: field.to_string(),
    })?;
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(FlowError::MissingAttribute {
            field: field.to_string(),
        }),
    }
}

/// Reads an attribute as a number, accepting numeric strings.
fn attr_number(record: &FeatureRecord, field: &str) -> Result<f64, FlowError> {
    let value = record.get(field).ok_or_else(|| FlowError::MissingAttribute {
        field: field.to_string(),
    })?;
    match value {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| FlowError::MissingAttribute {
            field: field.to_string(),
        }),
        serde_json::Value::String(s) => {
            s.trim()
                .parse::<f64>()
                .map_err(|_| FlowError::MissingAttribute {
                    field: field.to_string(),
                })
        }
        _ => Err(FlowError::MissingAttribute {
            field: field.to_string(),
        }),
    }
}
