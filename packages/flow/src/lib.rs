#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Commute map core: origin selection, filter state, trip aggregation,
//! and classification.
//!
//! All work reacts to UI events (click, hover, filter change) and
//! asynchronous query completions — single-threaded, no locks. The one
//! ordering hazard is a query resolving after its origin was
//! deselected or its filter invalidated; [`controller::MapController`]
//! tags every query and discards stale results. No failure here is
//! fatal: a failed query logs a diagnostic and leaves the last-good
//! view untouched.

pub mod aggregate;
pub mod classify;
pub mod controller;
pub mod filter;
pub mod selection;

use thiserror::Error;

/// Errors that can occur in the map core.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A feature service query failed. UI state is left unchanged.
    #[error("Query failed: {0}")]
    Query(#[from] commute_map_gateway::GatewayError),

    /// A time period was set before a day of week.
    #[error("Time period requires a day of week to be selected first")]
    InvalidFilterTransition,

    /// An expected attribute was absent from a record. The record is
    /// skipped, never fatal.
    #[error("Missing attribute: {field}")]
    MissingAttribute {
        /// The absent field name.
        field: String,
    },
}
