//! Explicit `lat, lng` pairs typed into the search bar.

use regex::Regex;
use signal_scope_coverage_models::LatLng;
use std::sync::LazyLock;

/// A signed decimal number, a comma, optional whitespace, and another.
/// Searched anywhere in the query, not anchored.
static COORDINATE_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+\.?\d*),\s*(-?\d+\.?\d*)").expect("valid regex"));

/// Parses the first coordinate pair found in `query`.
///
/// No range validation is done: `"95, 200"` yields `{lat: 95, lng: 200}`.
#[must_use]
pub fn parse_coordinates(query: &str) -> Option<LatLng> {
    let captures = COORDINATE_PAIR_RE.captures(query)?;
    let lat: f64 = captures.get(1)?.as_str().parse().ok()?;
    let lng: f64 = captures.get(2)?.as_str().parse().ok()?;
    Some(LatLng::new(lat, lng))
}
