//! Per-carrier coverage scoring at a query point.
//!
//! For each carrier the scorer looks at the towers and reports within a
//! radius of the point:
//!
//! 1. The average signal comes from nearby reports when there are any.
//! 2. Otherwise it is estimated from the nearest tower with a linear
//!    falloff of 3 dB per km from -60 dBm, floored at -120 dBm.
//! 3. With neither, the carrier gets a -100 dBm placeholder.
//!
//! The average is bucketed into a base score, and every nearby tower of the
//! carrier adds 5 points, capped at 100. The falloff is a display heuristic,
//! not a propagation model.

use signal_scope_coverage_models::{
    Carrier, CarrierComparison, LatLng, Recommendation, SignalReport, Tower,
};

use crate::distance::distance_between;

/// Radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Placeholder signal for a carrier with no towers or reports in range.
pub const NO_DATA_SIGNAL_DBM: i32 = -100;

/// Estimated signal directly under a tower.
pub const TOWER_SIGNAL_AT_ZERO_KM: f64 = -60.0;

/// Estimated loss per kilometer of distance from the nearest tower.
pub const TOWER_FALLOFF_DB_PER_KM: f64 = 3.0;

/// Weakest estimated signal.
pub const SIGNAL_FLOOR_DBM: f64 = -120.0;

/// Points added per nearby tower of the carrier.
pub const TOWER_BOOST: usize = 5;

const MAX_SCORE: u8 = 100;

/// Estimates signal strength from the distance to the nearest tower.
#[must_use]
pub fn estimate_signal_from_distance(distance_km: f64) -> f64 {
    TOWER_FALLOFF_DB_PER_KM
        .mul_add(-distance_km, TOWER_SIGNAL_AT_ZERO_KM)
        .max(SIGNAL_FLOOR_DBM)
}

/// Maps an average signal onto the base coverage score. `NaN` scores as
/// the weakest bucket.
#[must_use]
pub fn base_score(avg_signal: f64) -> u8 {
    if avg_signal >= -70.0 {
        100
    } else if avg_signal >= -80.0 {
        75
    } else if avg_signal >= -90.0 {
        50
    } else if avg_signal >= -100.0 {
        25
    } else {
        10
    }
}

/// Rounds a dBm value to the nearest integer, halves toward positive
/// infinity (`-65.5` becomes `-65`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_dbm(dbm: f64) -> i32 {
    (dbm + 0.5).floor() as i32
}

/// Arithmetic mean of signal strengths. Returns `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_signal(strengths: &[i32]) -> Option<f64> {
    if strengths.is_empty() {
        return None;
    }
    let sum: i64 = strengths.iter().copied().map(i64::from).sum();
    Some(sum as f64 / strengths.len() as f64)
}

/// Scores a single carrier at `point`.
///
/// Both the tower and the report radius checks are inclusive.
#[must_use]
pub fn score_carrier(
    towers: &[Tower],
    reports: &[SignalReport],
    point: LatLng,
    radius_km: f64,
    carrier: Carrier,
) -> CarrierComparison {
    let tower_distances: Vec<f64> = towers
        .iter()
        .filter(|tower| tower.operator == carrier)
        .map(|tower| distance_between(point, tower.position()))
        .filter(|distance| *distance <= radius_km)
        .collect();

    let report_strengths: Vec<i32> = reports
        .iter()
        .filter(|report| carrier.matches(&report.carrier))
        .filter(|report| distance_between(point, report.position()) <= radius_km)
        .map(|report| report.signal_strength)
        .collect();

    let avg_signal = mean_signal(&report_strengths).unwrap_or_else(|| {
        tower_distances
            .iter()
            .copied()
            .min_by(f64::total_cmp)
            .map_or(f64::from(NO_DATA_SIGNAL_DBM), estimate_signal_from_distance)
    });

    // Scored on the unrounded average; rounding is for display only.
    let boosted = usize::from(base_score(avg_signal))
        .saturating_add(TOWER_BOOST.saturating_mul(tower_distances.len()));
    let coverage_score = u8::try_from(boosted.min(usize::from(MAX_SCORE))).unwrap_or(MAX_SCORE);

    CarrierComparison {
        carrier,
        avg_signal: round_dbm(avg_signal),
        tower_count: tower_distances.len(),
        coverage_score,
        recommendation: Recommendation::from_score(coverage_score),
    }
}

/// Scores every carrier in `carriers` at `point` and ranks them by
/// coverage score, best first.
///
/// The sort is stable: carriers with equal scores keep their order in
/// `carriers`. The inputs are never modified and identical inputs always
/// produce identical output.
#[must_use]
pub fn compare_carriers(
    towers: &[Tower],
    reports: &[SignalReport],
    point: LatLng,
    radius_km: f64,
    carriers: &[Carrier],
) -> Vec<CarrierComparison> {
    let mut comparisons: Vec<CarrierComparison> = carriers
        .iter()
        .map(|carrier| score_carrier(towers, reports, point, radius_km, *carrier))
        .collect();

    comparisons.sort_by(|a, b| b.coverage_score.cmp(&a.coverage_score));

    log::debug!(
        "Compared {} carrier(s) at {point} within {radius_km} km over {} tower(s) and {} report(s)",
        comparisons.len(),
        towers.len(),
        reports.len()
    );

    comparisons
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use signal_scope_coverage_models::RadioTech;

    use super::*;

    const POINT: LatLng = LatLng::new(40.0, -75.0);

    /// Degrees of latitude spanning `km` kilometers on the scorer's sphere.
    fn lat_offset(km: f64) -> f64 {
        (km / crate::distance::EARTH_RADIUS_KM).to_degrees()
    }

    fn tower(id: &str, operator: Carrier, lat: f64, lng: f64) -> Tower {
        Tower {
            id: id.to_string(),
            lat,
            lng,
            operator,
            height: 150,
            tech: vec![RadioTech::Lte],
        }
    }

    fn report(id: &str, carrier: &str, lat: f64, lng: f64, signal_strength: i32) -> SignalReport {
        SignalReport {
            id: id.to_string(),
            lat,
            lng,
            carrier: carrier.to_string(),
            signal_strength,
            device: "Test Device".to_string(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn base_score_breakpoints() {
        assert_eq!(base_score(-50.0), 100);
        assert_eq!(base_score(-70.0), 100);
        assert_eq!(base_score(-70.2), 75);
        assert_eq!(base_score(-71.0), 75);
        assert_eq!(base_score(-80.0), 75);
        assert_eq!(base_score(-80.5), 50);
        assert_eq!(base_score(-90.0), 50);
        assert_eq!(base_score(-91.0), 25);
        assert_eq!(base_score(-100.0), 25);
        assert_eq!(base_score(-100.1), 10);
        assert_eq!(base_score(-140.0), 10);
        assert_eq!(base_score(f64::NAN), 10);
    }

    #[test]
    fn estimate_falls_off_linearly_and_floors() {
        assert!((estimate_signal_from_distance(0.0) - -60.0).abs() < f64::EPSILON);
        assert!((estimate_signal_from_distance(5.0) - -75.0).abs() < 1e-9);
        assert!((estimate_signal_from_distance(20.0) - -120.0).abs() < 1e-9);
        assert!((estimate_signal_from_distance(100.0) - -120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_dbm(-65.5), -65);
        assert_eq!(round_dbm(-65.4), -65);
        assert_eq!(round_dbm(-65.6), -66);
        assert_eq!(round_dbm(-90.0), -90);
    }

    #[test]
    fn fractional_mean_is_scored_before_rounding() {
        let reports = [
            report("r1", "T-Mobile", POINT.lat, POINT.lng, -70),
            report("r2", "T-Mobile", POINT.lat, POINT.lng, -71),
        ];
        let result = score_carrier(&[], &reports, POINT, DEFAULT_RADIUS_KM, Carrier::TMobile);
        assert_eq!(result.avg_signal, -70);
        assert_eq!(result.coverage_score, 75);
        assert_eq!(result.recommendation, Recommendation::Best);
    }

    #[test]
    fn fractional_estimate_is_scored_before_rounding() {
        // -60 - 3 * 3.4 = -70.2
        let towers = [tower("t1", Carrier::Verizon, POINT.lat + lat_offset(3.4), POINT.lng)];
        let result = score_carrier(&towers, &[], POINT, DEFAULT_RADIUS_KM, Carrier::Verizon);
        assert_eq!(result.avg_signal, -70);
        assert_eq!(result.tower_count, 1);
        assert_eq!(result.coverage_score, 80);
        assert_eq!(result.recommendation, Recommendation::Best);
    }

    #[test]
    fn no_data_is_poor() {
        let result = score_carrier(&[], &[], POINT, DEFAULT_RADIUS_KM, Carrier::Verizon);
        assert_eq!(result.avg_signal, NO_DATA_SIGNAL_DBM);
        assert_eq!(result.tower_count, 0);
        assert_eq!(result.coverage_score, 10);
        assert_eq!(result.recommendation, Recommendation::Poor);
    }

    #[test]
    fn out_of_radius_data_is_ignored() {
        let far = POINT.lat + lat_offset(6.0);
        let towers = [tower("t1", Carrier::Verizon, far, POINT.lng)];
        let reports = [report("r1", "Verizon", far, POINT.lng, -55)];
        let result = score_carrier(&towers, &reports, POINT, 5.0, Carrier::Verizon);
        assert_eq!(result.coverage_score, 10);
        assert_eq!(result.tower_count, 0);
    }

    #[test]
    fn strong_reports_without_towers_are_best() {
        let reports = [
            report("r1", "T-Mobile", POINT.lat, POINT.lng, -60),
            report("r2", "T-Mobile", POINT.lat, POINT.lng, -70),
        ];
        let result = score_carrier(&[], &reports, POINT, DEFAULT_RADIUS_KM, Carrier::TMobile);
        assert_eq!(result.avg_signal, -65);
        assert_eq!(result.tower_count, 0);
        assert_eq!(result.coverage_score, 100);
        assert_eq!(result.recommendation, Recommendation::Best);
    }

    #[test]
    fn tower_at_point_estimates_minus_sixty() {
        let towers = [tower("t1", Carrier::Att, POINT.lat, POINT.lng)];
        let result = score_carrier(&towers, &[], POINT, DEFAULT_RADIUS_KM, Carrier::Att);
        assert_eq!(result.avg_signal, -60);
        assert_eq!(result.tower_count, 1);
        assert_eq!(result.coverage_score, 100);
        assert_eq!(result.recommendation, Recommendation::Best);
    }

    #[test]
    fn nearest_tower_drives_the_estimate() {
        let towers = [
            tower("far", Carrier::TMobile, POINT.lat + lat_offset(15.0), POINT.lng),
            tower("near", Carrier::TMobile, POINT.lat + lat_offset(9.0), POINT.lng),
        ];
        let result = score_carrier(&towers, &[], POINT, 20.0, Carrier::TMobile);
        assert_eq!(result.avg_signal, -87);
        assert_eq!(result.tower_count, 2);
        assert_eq!(result.coverage_score, 60);
        assert_eq!(result.recommendation, Recommendation::Good);
    }

    #[test]
    fn distant_tower_estimate_hits_the_floor() {
        let towers = [tower("t1", Carrier::Verizon, POINT.lat + lat_offset(30.0), POINT.lng)];
        let result = score_carrier(&towers, &[], POINT, 50.0, Carrier::Verizon);
        assert_eq!(result.avg_signal, -120);
        assert_eq!(result.coverage_score, 15);
        assert_eq!(result.recommendation, Recommendation::Poor);
    }

    #[test]
    fn reports_take_precedence_over_towers() {
        let towers = [tower("t1", Carrier::Att, POINT.lat, POINT.lng)];
        let reports = [report("r1", "AT&T", POINT.lat, POINT.lng, -85)];
        let result = score_carrier(&towers, &reports, POINT, DEFAULT_RADIUS_KM, Carrier::Att);
        assert_eq!(result.avg_signal, -85);
        assert_eq!(result.coverage_score, 55);
        assert_eq!(result.recommendation, Recommendation::Good);
    }

    #[test]
    fn tower_boost_is_capped() {
        let towers: Vec<Tower> = (0..30)
            .map(|i| tower(&format!("t{i}"), Carrier::Verizon, POINT.lat, POINT.lng))
            .collect();
        let reports = [report("r1", "Verizon", POINT.lat, POINT.lng, -99)];
        let result = score_carrier(&towers, &reports, POINT, DEFAULT_RADIUS_KM, Carrier::Verizon);
        assert_eq!(result.tower_count, 30);
        assert_eq!(result.coverage_score, 100);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let towers = [tower("t1", Carrier::TMobile, POINT.lat + lat_offset(3.0), POINT.lng)];
        let radius = distance_between(POINT, towers[0].position());
        let result = score_carrier(&towers, &[], POINT, radius, Carrier::TMobile);
        assert_eq!(result.tower_count, 1);
    }

    #[test]
    fn report_carrier_matching_ignores_case() {
        let reports = [report("r1", "  verizon ", POINT.lat, POINT.lng, -75)];
        let result = score_carrier(&[], &reports, POINT, DEFAULT_RADIUS_KM, Carrier::Verizon);
        assert_eq!(result.avg_signal, -75);
        assert_eq!(result.coverage_score, 75);
    }

    #[test]
    fn other_carriers_towers_do_not_count() {
        let towers = [tower("t1", Carrier::Att, POINT.lat, POINT.lng)];
        let result = score_carrier(&towers, &[], POINT, DEFAULT_RADIUS_KM, Carrier::TMobile);
        assert_eq!(result.tower_count, 0);
        assert_eq!(result.coverage_score, 10);
    }

    #[test]
    fn comparisons_are_sorted_best_first() {
        let towers = [tower("t1", Carrier::Att, POINT.lat, POINT.lng)];
        let reports = [report("r1", "Verizon", POINT.lat, POINT.lng, -85)];
        let result = compare_carriers(
            &towers,
            &reports,
            POINT,
            DEFAULT_RADIUS_KM,
            &[Carrier::TMobile, Carrier::Verizon, Carrier::Att],
        );
        let carriers: Vec<Carrier> = result.iter().map(|c| c.carrier).collect();
        assert_eq!(carriers, [Carrier::Att, Carrier::Verizon, Carrier::TMobile]);
        assert!(
            result
                .windows(2)
                .all(|w| w[0].coverage_score >= w[1].coverage_score)
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let result = compare_carriers(
            &[],
            &[],
            POINT,
            DEFAULT_RADIUS_KM,
            &[Carrier::Verizon, Carrier::Att, Carrier::TMobile],
        );
        let carriers: Vec<Carrier> = result.iter().map(|c| c.carrier).collect();
        assert_eq!(carriers, [Carrier::Verizon, Carrier::Att, Carrier::TMobile]);
        assert!(result.iter().all(|c| c.coverage_score == 10));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let towers = [
            tower("t1", Carrier::Att, POINT.lat, POINT.lng),
            tower("t2", Carrier::TMobile, POINT.lat + lat_offset(2.5), POINT.lng),
        ];
        let reports = [report("r1", "Verizon", POINT.lat, POINT.lng, -77)];
        let first = compare_carriers(&towers, &reports, POINT, 5.0, Carrier::all());
        let second = compare_carriers(&towers, &reports, POINT, 5.0, Carrier::all());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_carrier_list_yields_empty_result() {
        assert!(compare_carriers(&[], &[], POINT, DEFAULT_RADIUS_KM, &[]).is_empty());
    }
}
