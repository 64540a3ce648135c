#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature service gateway.
//!
//! The map core queries OD trip records through the [`FeatureQuery`]
//! trait and never touches HTTP directly. [`arcgis`] provides the
//! production implementation against `ArcGIS` `FeatureServer` REST
//! endpoints; tests substitute an in-memory implementation.

pub mod arcgis;
pub mod config;
pub mod predicate;
pub mod registry;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service definition TOML parsing failed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The feature service returned an error envelope or a malformed
    /// response.
    #[error("Feature service error: {message}")]
    Service {
        /// Description of what went wrong.
        message: String,
    },
}

/// One feature's attributes, keyed by field name. Geometry is never
/// requested; the mapping SDK fetches it separately for rendering.
pub type FeatureRecord = BTreeMap<String, serde_json::Value>;

/// The feature query capability the map core consumes.
///
/// Implementations issue a `where` filter against one layer of a
/// feature service and return matching records with only the requested
/// output fields populated.
#[async_trait]
pub trait FeatureQuery: Send + Sync {
    /// Queries `layer` for records matching `where_clause`, returning
    /// only `out_fields` attributes.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the response
    /// cannot be parsed.
    async fn query_features(
        &self,
        layer: u32,
        where_clause: &str,
        out_fields: &[&str],
    ) -> Result<Vec<FeatureRecord>, GatewayError>;
}
