#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search-bar location resolution.
//!
//! Turns free text into a map point without any network calls, trying in
//! order:
//!
//! 1. **Coordinate pair**: `"40.7128, -74.0060"` anywhere in the query.
//! 2. **ZIP code**: recognized, but left unresolved.
//! 3. **Exact gazetteer key**: city names and aliases (`"nyc"`).
//! 4. **Fuzzy gazetteer match**: longest key that contains or is
//!    contained in the query.
//!
//! Anything else resolves to `None`; the caller decides how to present a
//! "not found" state.

pub mod coordinates;
pub mod gazetteer;
pub mod normalize;

use serde::Serialize;
use signal_scope_coverage_models::LatLng;

pub use coordinates::parse_coordinates;

/// How a query was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// The query contained an explicit coordinate pair.
    Coordinates,
    /// The normalized query is a gazetteer key.
    Exact,
    /// A gazetteer key was found by substring matching.
    Fuzzy,
}

/// A resolved query with provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Resolved point.
    pub point: LatLng,
    /// Which step produced the point.
    pub method: ResolutionMethod,
    /// Canonical city name for gazetteer matches.
    pub place: Option<String>,
    /// Gazetteer key that matched, for gazetteer matches.
    pub matched_key: Option<String>,
}

/// Resolves a free-text query to a point.
#[must_use]
pub fn resolve(query: &str) -> Option<LatLng> {
    resolve_detailed(query).map(|resolution| resolution.point)
}

/// Resolves a free-text query, reporting which step matched.
#[must_use]
pub fn resolve_detailed(query: &str) -> Option<Resolution> {
    if let Some(point) = parse_coordinates(query) {
        return Some(Resolution {
            point,
            method: ResolutionMethod::Coordinates,
            place: None,
            matched_key: None,
        });
    }

    let normalized = normalize::normalize(query);
    if normalized.is_empty() {
        return None;
    }

    if normalize::is_zip_code(&normalized) {
        log::debug!("ZIP code lookup is not supported: {normalized}");
        return None;
    }

    if let Some(place) = gazetteer::lookup_exact(&normalized) {
        return Some(Resolution {
            point: place.point,
            method: ResolutionMethod::Exact,
            place: Some(place.name.clone()),
            matched_key: Some(normalized),
        });
    }

    if let Some((key, place)) = gazetteer::lookup_fuzzy(&normalized) {
        log::debug!("Fuzzy-matched {normalized:?} to gazetteer key {key:?}");
        return Some(Resolution {
            point: place.point,
            method: ResolutionMethod::Fuzzy,
            place: Some(place.name.clone()),
            matched_key: Some(key.to_string()),
        });
    }

    log::debug!("No location found for {normalized:?}");
    None
}
