//! Great-circle distance on a spherical Earth.

use signal_scope_coverage_models::LatLng;

/// Earth radius used for every distance in the system, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points in decimal degrees.
///
/// Inputs are not range-checked. NaN in any coordinate yields NaN.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// [`distance_km`] between two [`LatLng`] points.
#[must_use]
pub fn distance_between(a: LatLng, b: LatLng) -> f64 {
    distance_km(a.lat, a.lng, b.lat, b.lng)
}
