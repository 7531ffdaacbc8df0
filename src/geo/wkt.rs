// SPDX-License-Identifier: MIT
//! Well-Known Text parsing and serialization.
//!
//! Emits and consumes `POLYGON((lng lat, ...))` and `POINT(lng lat)`.
//! Serialized rings are closed (first pair repeated last); parsed rings come
//! back open. Parsers are tolerant: malformed or out-of-range input yields
//! `None`, never a panic — callers treat `None` as "no geometry available",
//! not as an empty polygon.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{open_ring, Coordinate};

static POLYGON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*POLYGON\s*\(\s*\((?<ring>[^()]*)\)\s*\)\s*$").unwrap());

static POINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*POINT\s*\((?<pair>[^()]*)\)\s*$").unwrap());

/// Serialize an open polygon to WKT, closing the ring by repeating the first
/// vertex. Pairs are `longitude latitude` — the axis flip from
/// [`Coordinate`] field order happens here.
pub fn to_wkt(polygon: &[Coordinate]) -> String {
    let Some(first) = polygon.first() else {
        return "POLYGON EMPTY".to_string();
    };
    let pairs: Vec<String> = polygon
        .iter()
        .chain(std::iter::once(first))
        .map(|c| format!("{} {}", c.longitude, c.latitude))
        .collect();
    format!("POLYGON(({}))", pairs.join(", "))
}

/// Serialize a single point marker to `POINT(lng lat)`.
pub fn point_to_wkt(point: &Coordinate) -> String {
    format!("POINT({} {})", point.longitude, point.latitude)
}

/// Parse a WKT `POLYGON` or `POINT` into coordinates.
///
/// A closed polygon ring is returned open (closing vertex stripped); a point
/// parses to a single-element vector. Any other geometry type, malformed
/// text, or out-of-range value yields `None`.
pub fn parse_wkt(text: &str) -> Option<Vec<Coordinate>> {
    if let Some(caps) = POLYGON_RE.captures(text) {
        return parse_ring(&caps["ring"]);
    }
    if let Some(caps) = POINT_RE.captures(text) {
        let (x, y) = parse_pair(&caps["pair"])?;
        return point_from_ambiguous_axes(x, y).map(|c| vec![c]);
    }
    None
}

fn parse_ring(body: &str) -> Option<Vec<Coordinate>> {
    let mut ring = Vec::new();
    for pair in body.split(',') {
        let (lng, lat) = parse_pair(pair)?;
        ring.push(Coordinate::new(lat, lng)?);
    }
    Some(open_ring(ring))
}

fn parse_pair(pair: &str) -> Option<(f64, f64)> {
    let mut parts = pair.split_whitespace();
    let x: f64 = parts.next()?.parse().ok()?;
    let y: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// Axis-order fallback for `POINT` markers.
///
/// WKT convention puts longitude first, but point markers in legacy plot
/// records sometimes arrive latitude-first. A magnitude above 90 cannot be a
/// latitude, so such a second value is taken to be the longitude.
fn point_from_ambiguous_axes(x: f64, y: f64) -> Option<Coordinate> {
    if y.abs() > 90.0 {
        // y cannot be a latitude, so the writer used (lat lng) order.
        Coordinate::new(x, y)
    } else {
        Coordinate::new(y, x)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
