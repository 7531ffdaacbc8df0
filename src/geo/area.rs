//! Spherical-excess area for plot-scale polygons.

use super::Coordinate;

/// Mean Earth radius, meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const M2_PER_HECTARE: f64 = 10_000.0;

/// Area of a geodetic polygon in square meters, rounded to the nearest
/// integer value.
///
/// Spherical-excess summation on a sphere of radius [`EARTH_RADIUS_M`]:
/// accurate for plot-scale rings (hundreds of meters to a few kilometers),
/// not geodesically exact for very large polygons.
///
/// Fewer than 3 vertices is an incomplete shape, not an error: returns 0.0.
/// The ring may be passed open or closed; both give the same result.
pub fn compute_area(polygon: &[Coordinate]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p1) in polygon.iter().enumerate() {
        let p2 = &polygon[(i + 1) % polygon.len()];
        sum += (p2.longitude - p1.longitude).to_radians()
            * (2.0 + p1.latitude.to_radians().sin() + p2.latitude.to_radians().sin());
    }
    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs().round()
}

/// Convert square meters to hectares — verdicts and plot records talk
/// hectares, the engine talks square meters.
pub fn area_hectares(area_m2: f64) -> f64 {
    area_m2 / M2_PER_HECTARE
}
