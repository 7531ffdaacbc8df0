//! GeoJSON geometry parsing and serialization.
//!
//! Understands the `Polygon` and `Point` geometry types — the same surface
//! as the WKT side. Coordinate pairs are `[longitude, latitude]` arrays per
//! the GeoJSON convention.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{open_ring, Coordinate};

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

/// Serialize an open polygon as a GeoJSON `Polygon` value with a closed
/// exterior ring, pairs in (longitude, latitude) order.
pub fn to_geojson(polygon: &[Coordinate]) -> Value {
    let mut ring: Vec<Value> = polygon.iter().map(pair).collect();
    if let Some(first) = polygon.first() {
        ring.push(pair(first));
    }
    json!({ "type": "Polygon", "coordinates": [ring] })
}

/// [`to_geojson`] rendered to a compact string for wire payloads.
pub fn to_geojson_string(polygon: &[Coordinate]) -> String {
    to_geojson(polygon).to_string()
}

fn pair(c: &Coordinate) -> Value {
    json!([c.longitude, c.latitude])
}

/// Parse a GeoJSON `Polygon` (exterior ring, returned open) or `Point`.
///
/// `None` on malformed JSON, an unrecognized geometry type, or out-of-range
/// values. Positions may carry an altitude third element; it is ignored.
pub fn parse_geojson(text: &str) -> Option<Vec<Coordinate>> {
    let geometry: Geometry = serde_json::from_str(text).ok()?;
    match geometry.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates).ok()?;
            let exterior = rings.into_iter().next()?;
            let mut ring = Vec::with_capacity(exterior.len());
            for position in &exterior {
                ring.push(coordinate_from_position(position)?);
            }
            Some(open_ring(ring))
        }
        "Point" => {
            let position: Vec<f64> = serde_json::from_value(geometry.coordinates).ok()?;
            coordinate_from_position(&position).map(|c| vec![c])
        }
        _ => None,
    }
}

fn coordinate_from_position(position: &[f64]) -> Option<Coordinate> {
    match *position {
        [lng, lat] | [lng, lat, _] => Coordinate::new(lat, lng),
        _ => None,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
