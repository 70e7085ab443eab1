#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the `SignalScope` server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the core coverage types to allow independent evolution of the API
//! contract.

use serde::{Deserialize, Serialize};
use signal_scope_coverage_models::{
    Carrier, CarrierComparison, CarrierCount, CarrierSignal, FavoriteLocation, LatLng,
    NearbyTower, QualityCount,
};
use signal_scope_geocoder::{Resolution, ResolutionMethod};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the towers endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TowersQueryParams {
    /// Carrier name to filter by. Omit for all carriers.
    pub carrier: Option<String>,
}

/// Query parameters for the comparison endpoint.
///
/// Either `lat` and `lng`, or `q`, must be given. When both are present the
/// explicit coordinates win.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQueryParams {
    /// Latitude of the query point.
    pub lat: Option<f64>,
    /// Longitude of the query point.
    pub lng: Option<f64>,
    /// Free-text location, resolved when no coordinates are given.
    pub q: Option<String>,
    /// Search radius in kilometers (default 5).
    pub radius_km: Option<f64>,
    /// Comma-separated carrier names. Omit for all carriers.
    pub carriers: Option<String>,
}

/// Response from the comparison endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Point the comparison was computed at.
    pub center: LatLng,
    /// Radius used, in kilometers.
    pub radius_km: f64,
    /// How `q` was resolved, when the point came from a query.
    pub resolution: Option<ApiResolution>,
    /// Carriers ranked by coverage score, best first.
    pub comparisons: Vec<CarrierComparison>,
}

/// Query parameters for the resolve endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveQueryParams {
    /// Free-text location.
    pub q: String,
}

/// A resolved location as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResolution {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Which resolver step matched.
    pub method: ResolutionMethod,
    /// Canonical city name for gazetteer matches.
    pub place: Option<String>,
    /// Gazetteer key that matched.
    pub matched_key: Option<String>,
}

impl From<Resolution> for ApiResolution {
    fn from(resolution: Resolution) -> Self {
        Self {
            lat: resolution.point.lat,
            lng: resolution.point.lng,
            method: resolution.method,
            place: resolution.place,
            matched_key: resolution.matched_key,
        }
    }
}

/// Query parameters for the nearest-towers endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestQueryParams {
    /// Latitude of the query point.
    pub lat: f64,
    /// Longitude of the query point.
    pub lng: f64,
    /// Maximum number of towers (default 5).
    pub limit: Option<usize>,
    /// Carrier name to filter by.
    pub carrier: Option<String>,
}

/// Response from the nearest-towers endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestResponse {
    /// Point distances were measured from.
    pub center: LatLng,
    /// Towers, nearest first.
    pub towers: Vec<NearbyTower>,
}

/// Dashboard analytics panel data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Total towers in the snapshot.
    pub tower_count: usize,
    /// Total reports in the snapshot.
    pub report_count: usize,
    /// Towers per carrier.
    pub towers_by_carrier: Vec<CarrierCount>,
    /// Mean reported signal per carrier.
    pub avg_signal_by_carrier: Vec<CarrierSignal>,
    /// Reports per signal quality bucket.
    pub signal_quality: Vec<QualityCount>,
}

/// Query parameters for comparing coverage at a saved favorite.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCompareParams {
    /// Search radius in kilometers (default 5).
    pub radius_km: Option<f64>,
}

/// Response from the favorite comparison endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCompareResponse {
    /// The favorite the comparison was computed at.
    pub favorite: FavoriteLocation,
    /// Radius used, in kilometers.
    pub radius_km: f64,
    /// Carriers ranked by coverage score, best first.
    pub comparisons: Vec<CarrierComparison>,
}

/// Parses a comma-separated carrier list.
///
/// Unknown names are skipped. A missing or empty list means every carrier.
#[must_use]
pub fn parse_carriers(raw: Option<&str>) -> Vec<Carrier> {
    let carriers: Vec<Carrier> = raw
        .map(|s| s.split(',').filter_map(Carrier::from_report_name).collect())
        .unwrap_or_default();

    if carriers.is_empty() {
        Carrier::all().to_vec()
    } else {
        carriers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_carrier_list() {
        assert_eq!(
            parse_carriers(Some("verizon, AT&T")),
            vec![Carrier::Verizon, Carrier::Att]
        );
    }

    #[test]
    fn missing_carrier_list_means_all() {
        assert_eq!(parse_carriers(None), Carrier::all().to_vec());
        assert_eq!(parse_carriers(Some("")), Carrier::all().to_vec());
    }

    #[test]
    fn unknown_carriers_are_skipped() {
        assert_eq!(
            parse_carriers(Some("Sprint,T-Mobile")),
            vec![Carrier::TMobile]
        );
        assert_eq!(parse_carriers(Some("Sprint")), Carrier::all().to_vec());
    }

    #[test]
    fn resolution_converts_to_api_shape() {
        let resolution = signal_scope_geocoder::resolve_detailed("nyc").unwrap();
        let api = ApiResolution::from(resolution);
        assert!((api.lat - 40.7128).abs() < f64::EPSILON);
        assert_eq!(api.method, ResolutionMethod::Exact);
        assert_eq!(api.place.as_deref(), Some("New York"));
    }
}
