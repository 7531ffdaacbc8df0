//! Geodetic point shared by every component of the capture subsystem.

use serde::{Deserialize, Serialize};

/// A geodetic point: latitude then longitude, decimal degrees.
///
/// Field order is the opposite of the (longitude, latitude) convention used
/// by WKT and GeoJSON text — the serializers in [`crate::geo`] perform that
/// axis flip at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values.
    ///
    /// Latitude must lie within [-90, 90] and longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}
