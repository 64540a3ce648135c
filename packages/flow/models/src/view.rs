//! View models consumed by the presentation sink.
//!
//! The sink (side panel, tooltip, highlight graphics) renders these
//! as-is; it produces no data back.

use serde::{Deserialize, Serialize};

use crate::BlockGroupId;
use crate::breaks::Bucket;

/// One selected origin as listed in the side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginSummary {
    /// Origin block group GEOID.
    pub geoid: BlockGroupId,
    /// Municipality name, where the block-group layer provides one.
    pub municipality: Option<String>,
    /// Total outbound trips from this origin under the current filter.
    pub total_trips: f64,
}

/// A destination polygon with its combined trip count and fill bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationShade {
    /// Destination block group GEOID.
    pub geoid: BlockGroupId,
    /// Trips summed across all selected origins.
    pub trips: f64,
    /// Classified bucket for the fill symbol.
    pub bucket: Bucket,
}

/// Side panel content. Absent entirely when nothing is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    /// Every selected origin with its subtotal.
    pub origins: Vec<OriginSummary>,
}

/// Everything the map needs to redraw after a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Origin polygons to highlight.
    pub highlighted_origins: Vec<BlockGroupId>,
    /// Destination polygons to shade, excluding selected origins.
    pub destinations: Vec<DestinationShade>,
    /// Side panel content, or `None` to hide the panel.
    pub panel: Option<PanelView>,
}

/// Hover tooltip content for a destination polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// Hovered block group GEOID.
    pub geoid: BlockGroupId,
    /// Combined trips into this block group from all selected origins.
    pub total_trips: f64,
}
