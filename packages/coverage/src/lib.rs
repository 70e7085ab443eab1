#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coverage analytics over an in-memory tower/report snapshot.
//!
//! Everything in this crate is a pure function of its inputs: callers own
//! the tower and report collections and pass them in by reference. The
//! [`scoring`] module ranks carriers at a point, [`distance`] provides the
//! haversine leaf used everywhere, [`analytics`] backs the dashboard's
//! summary charts, and [`seed`] ships the sample data the dashboard starts
//! with.

pub mod analytics;
pub mod distance;
pub mod scoring;
pub mod seed;

use signal_scope_coverage_models::{
    Carrier, CarrierComparison, LatLng, MapMarker, SignalReport, Tower,
};

pub use distance::{distance_between, distance_km};
pub use scoring::{DEFAULT_RADIUS_KM, compare_carriers};

/// A tower and report set analyzed together.
///
/// The snapshot is plain data; appending a report produces the next
/// snapshot and never affects comparisons already computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Transmission sites.
    pub towers: Vec<Tower>,
    /// Crowd-sourced measurements.
    pub reports: Vec<SignalReport>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(towers: Vec<Tower>, reports: Vec<SignalReport>) -> Self {
        Self { towers, reports }
    }

    /// Snapshot of the bundled sample towers and reports.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::towers(), seed::reports())
    }

    /// Ranks `carriers` at `point` using this snapshot.
    #[must_use]
    pub fn compare(
        &self,
        point: LatLng,
        radius_km: f64,
        carriers: &[Carrier],
    ) -> Vec<CarrierComparison> {
        compare_carriers(&self.towers, &self.reports, point, radius_km, carriers)
    }

    /// All towers followed by all reports as map markers.
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker> {
        self.towers
            .iter()
            .cloned()
            .map(MapMarker::Tower)
            .chain(self.reports.iter().cloned().map(MapMarker::Report))
            .collect()
    }
}
