//! Geometry engine: pure functions over geodetic coordinates.
//!
//! No state, no I/O. The one deliberate hazard lives here: [`Coordinate`]
//! stores (latitude, longitude) while every serialized form emits
//! (longitude, latitude). Both directions of that flip are covered by tests
//! in `wkt` and `geojson`.

pub mod area;
pub mod coordinate;
pub mod geojson;
pub mod wkt;

pub use area::{area_hectares, compute_area, EARTH_RADIUS_M};
pub use coordinate::Coordinate;
pub use geojson::{parse_geojson, to_geojson, to_geojson_string};
pub use wkt::{parse_wkt, point_to_wkt, to_wkt};

/// Geodetic text with its format named by the caller.
///
/// Whoever holds the text knows which convention produced it and says so
/// here — parsing never sniffs string prefixes to guess a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeodeticText {
    Wkt(String),
    GeoJson(String),
}

impl GeodeticText {
    /// Parse through the named format's parser. `None` means "no geometry
    /// available", never an empty polygon.
    pub fn parse(&self) -> Option<Vec<Coordinate>> {
        match self {
            GeodeticText::Wkt(text) => parse_wkt(text),
            GeodeticText::GeoJson(text) => parse_geojson(text),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GeodeticText::Wkt(text) | GeodeticText::GeoJson(text) => text,
        }
    }
}

/// Strip the duplicated closing vertex from a parsed ring, if present.
pub(crate) fn open_ring(mut ring: Vec<Coordinate>) -> Vec<Coordinate> {
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}
