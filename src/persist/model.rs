//! Records owned by the persistence layer's backing store.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, GeodeticText};

/// Lifecycle state of a plot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Active,
    Pending,
    Retired,
}

/// A plot record as supplied by the backing store.
///
/// Read-only to this crate: the capture subsystem draws against it but never
/// mutates it — only [`PlotBoundaryUpdate`] travels back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePlot {
    pub plot_id: String,
    pub farmer_id: String,
    /// Recorded area, hectares.
    pub area: f64,
    /// Cadastral parcel number, when the plot is mapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so_thua: Option<u32>,
    /// Cadastral sheet number, when the plot is mapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so_to: Option<u32>,
    pub status: PlotStatus,
    /// WKT `POINT` locating the plot on the map, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_wkt: Option<String>,
}

impl ReferencePlot {
    /// Parse the plot's map marker. `None` covers both an absent marker and
    /// one that fails to parse — the caller has no position either way.
    pub fn marker(&self) -> Option<Coordinate> {
        let text = GeodeticText::Wkt(self.marker_wkt.clone()?);
        text.parse()?.into_iter().next()
    }
}

/// Payload replacing a plot's recorded boundary.
///
/// The boundary travels as WKT while task completion travels as GeoJSON —
/// both serialize the same in-memory polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBoundaryUpdate {
    pub farmer_id: String,
    /// Closed-ring WKT `POLYGON`.
    pub boundary: String,
    /// Drawn area, hectares.
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so_thua: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so_to: Option<u32>,
    pub status: PlotStatus,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
