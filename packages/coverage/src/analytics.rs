//! Summary figures for the dashboard's analytics panel.

use std::collections::BTreeMap;

use signal_scope_coverage_models::{
    Carrier, CarrierCount, CarrierSignal, LatLng, NearbyTower, QualityCount, SignalQuality,
    SignalReport, Tower,
};

use crate::distance::distance_between;
use crate::scoring::{mean_signal, round_dbm};

/// Towers matching an optional carrier filter (`None` keeps every tower).
#[must_use]
pub fn filter_towers(towers: &[Tower], carrier: Option<Carrier>) -> Vec<&Tower> {
    towers
        .iter()
        .filter(|tower| carrier.is_none_or(|c| tower.operator == c))
        .collect()
}

/// Tower count per carrier, in [`Carrier::all`] order. Carriers without
/// towers are included with a zero count.
#[must_use]
pub fn towers_by_carrier(towers: &[Tower]) -> Vec<CarrierCount> {
    Carrier::all()
        .iter()
        .map(|carrier| CarrierCount {
            carrier: *carrier,
            count: towers.iter().filter(|t| t.operator == *carrier).count(),
        })
        .collect()
}

/// Mean reported signal per carrier, in [`Carrier::all`] order.
///
/// Carriers without reports are omitted. Reports naming a carrier outside
/// the known set are ignored.
#[must_use]
pub fn average_signal_by_carrier(reports: &[SignalReport]) -> Vec<CarrierSignal> {
    let mut by_carrier: BTreeMap<Carrier, Vec<i32>> = BTreeMap::new();

    for report in reports {
        if let Some(carrier) = Carrier::from_report_name(&report.carrier) {
            by_carrier
                .entry(carrier)
                .or_default()
                .push(report.signal_strength);
        } else {
            log::trace!(
                "Skipping report {} with unknown carrier {:?}",
                report.id,
                report.carrier
            );
        }
    }

    Carrier::all()
        .iter()
        .filter_map(|carrier| {
            let strengths = by_carrier.get(carrier)?;
            let mean = mean_signal(strengths)?;
            Some(CarrierSignal {
                carrier: *carrier,
                avg_signal: round_dbm(mean),
                report_count: strengths.len(),
            })
        })
        .collect()
}

/// Report count per [`SignalQuality`] bucket, strongest bucket first.
/// Every bucket is present.
#[must_use]
pub fn signal_quality_breakdown(reports: &[SignalReport]) -> Vec<QualityCount> {
    SignalQuality::all()
        .iter()
        .map(|quality| QualityCount {
            quality: *quality,
            count: reports
                .iter()
                .filter(|r| SignalQuality::from_dbm(r.signal_strength) == *quality)
                .count(),
        })
        .collect()
}

/// The `limit` towers closest to `point`, nearest first.
///
/// Towers at equal distance keep their input order.
#[must_use]
pub fn nearest_towers(
    towers: &[Tower],
    point: LatLng,
    limit: usize,
    carrier: Option<Carrier>,
) -> Vec<NearbyTower> {
    let mut nearby: Vec<NearbyTower> = filter_towers(towers, carrier)
        .into_iter()
        .map(|tower| NearbyTower {
            distance_km: distance_between(point, tower.position()),
            tower: tower.clone(),
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn filter_none_keeps_everything() {
        let towers = seed::towers();
        assert_eq!(filter_towers(&towers, None).len(), towers.len());
    }

    #[test]
    fn filter_by_carrier() {
        let towers = seed::towers();
        let filtered = filter_towers(&towers, Some(Carrier::Att));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| t.operator == Carrier::Att));
    }

    #[test]
    fn counts_seed_towers_by_carrier() {
        let counts = towers_by_carrier(&seed::towers());
        assert_eq!(
            counts,
            vec![
                CarrierCount {
                    carrier: Carrier::TMobile,
                    count: 4
                },
                CarrierCount {
                    carrier: Carrier::Verizon,
                    count: 2
                },
                CarrierCount {
                    carrier: Carrier::Att,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn zero_counts_are_kept() {
        let counts = towers_by_carrier(&[]);
        assert_eq!(counts.len(), Carrier::all().len());
        assert!(counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn averages_reports_per_carrier() {
        let mut reports = seed::reports();
        let mut extra = reports[0].clone();
        extra.id = "r4".to_string();
        extra.carrier = "t-mobile".to_string();
        extra.signal_strength = -70;
        reports.push(extra);

        let mut unknown = reports[1].clone();
        unknown.id = "r5".to_string();
        unknown.carrier = "Sprint".to_string();
        reports.push(unknown);

        let averages = average_signal_by_carrier(&reports);
        assert_eq!(
            averages,
            vec![
                CarrierSignal {
                    carrier: Carrier::TMobile,
                    avg_signal: -67,
                    report_count: 2
                },
                CarrierSignal {
                    carrier: Carrier::Verizon,
                    avg_signal: -75,
                    report_count: 1
                },
                CarrierSignal {
                    carrier: Carrier::Att,
                    avg_signal: -90,
                    report_count: 1
                },
            ]
        );
    }

    #[test]
    fn carriers_without_reports_are_omitted() {
        let reports: Vec<SignalReport> = seed::reports()
            .into_iter()
            .filter(|r| r.carrier == "Verizon")
            .collect();
        let averages = average_signal_by_carrier(&reports);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].carrier, Carrier::Verizon);
    }

    #[test]
    fn quality_breakdown_has_every_bucket() {
        let breakdown = signal_quality_breakdown(&seed::reports());
        let counts: Vec<(SignalQuality, usize)> =
            breakdown.iter().map(|q| (q.quality, q.count)).collect();
        assert_eq!(
            counts,
            vec![
                (SignalQuality::Excellent, 0),
                (SignalQuality::Good, 2),
                (SignalQuality::Poor, 1),
                (SignalQuality::VeryPoor, 0),
            ]
        );
    }

    #[test]
    fn nearest_towers_sorted_and_truncated() {
        let towers = seed::towers();
        let point = LatLng::new(40.7128, -74.0060);
        let nearest = nearest_towers(&towers, point, 3, None);
        assert_eq!(nearest.len(), 3);
        assert_eq!(nearest[0].tower.id, "t1");
        assert!(nearest[0].distance_km.abs() < f64::EPSILON);
        assert!(
            nearest
                .windows(2)
                .all(|w| w[0].distance_km <= w[1].distance_km)
        );
    }

    #[test]
    fn nearest_towers_respects_carrier_filter() {
        let towers = seed::towers();
        let point = LatLng::new(40.7128, -74.0060);
        let nearest = nearest_towers(&towers, point, 10, Some(Carrier::Verizon));
        assert_eq!(nearest.len(), 2);
        assert!(nearest.iter().all(|n| n.tower.operator == Carrier::Verizon));
    }

    #[test]
    fn nearest_towers_with_zero_limit_is_empty() {
        let towers = seed::towers();
        assert!(nearest_towers(&towers, LatLng::new(0.0, 0.0), 0, None).is_empty());
    }
}
