//! Plain-text rendering of command results.

use std::fmt::Write as _;

use signal_scope_coverage_models::{
    CarrierComparison, CarrierCount, CarrierSignal, LatLng, NearbyTower, QualityCount,
};
use signal_scope_geocoder::{Resolution, ResolutionMethod};

/// One line describing how a location was found.
#[must_use]
pub fn resolution_line(resolution: &Resolution) -> String {
    match (resolution.method, &resolution.place, &resolution.matched_key) {
        (ResolutionMethod::Coordinates, _, _) => {
            format!("{} (coordinates)", resolution.point)
        }
        (method, Some(place), Some(key)) => {
            let method = match method {
                ResolutionMethod::Fuzzy => "fuzzy",
                _ => "exact",
            };
            format!("{} ({place}, {method} match on {key:?})", resolution.point)
        }
        _ => resolution.point.to_string(),
    }
}

/// Ranked carrier table.
#[must_use]
pub fn comparison_table(center: LatLng, radius_km: f64, comparisons: &[CarrierComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Coverage within {radius_km} km of {center}");
    let _ = writeln!(
        out,
        "{:<4} {:<10} {:>10} {:>7} {:>6}  RECOMMENDATION",
        "#", "CARRIER", "AVG (dBm)", "TOWERS", "SCORE"
    );
    let _ = writeln!(out, "{}", "-".repeat(58));
    for (rank, c) in comparisons.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<10} {:>10} {:>7} {:>6}  {}",
            rank + 1,
            c.carrier.to_string(),
            c.avg_signal,
            c.tower_count,
            c.coverage_score,
            c.recommendation
        );
    }
    out
}

/// Nearest-tower table.
#[must_use]
pub fn nearest_table(center: LatLng, towers: &[NearbyTower]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Towers nearest {center}");
    let _ = writeln!(
        out,
        "{:<6} {:<10} {:>12} {:>8}  TECH",
        "ID", "CARRIER", "DISTANCE", "HEIGHT"
    );
    let _ = writeln!(out, "{}", "-".repeat(50));
    for nearby in towers {
        let tech: Vec<String> = nearby.tower.tech.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "{:<6} {:<10} {:>9.2} km {:>6} m  {}",
            nearby.tower.id,
            nearby.tower.operator.to_string(),
            nearby.distance_km,
            nearby.tower.height,
            tech.join(", ")
        );
    }
    out
}

/// Analytics panel summary.
#[must_use]
pub fn analytics_summary(
    tower_count: usize,
    report_count: usize,
    towers_by_carrier: &[CarrierCount],
    avg_signal_by_carrier: &[CarrierSignal],
    signal_quality: &[QualityCount],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Towers: {tower_count}  Reports: {report_count}");

    let _ = writeln!(out);
    let _ = writeln!(out, "Towers by carrier");
    for entry in towers_by_carrier {
        let _ = writeln!(out, "  {:<10} {:>4}", entry.carrier.to_string(), entry.count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Average reported signal");
    if avg_signal_by_carrier.is_empty() {
        let _ = writeln!(out, "  (no reports)");
    }
    for entry in avg_signal_by_carrier {
        let _ = writeln!(
            out,
            "  {:<10} {:>4} dBm ({} report(s))",
            entry.carrier.to_string(),
            entry.avg_signal,
            entry.report_count
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Signal quality");
    for entry in signal_quality {
        let _ = writeln!(out, "  {:<10} {:>4}", entry.quality.label(), entry.count);
    }
    out
}
