//! Sample towers and reports bundled with the dashboard.
//!
//! The data lives in TOML files under `seed/` and is embedded at compile
//! time, so a malformed file is a build-time mistake rather than a runtime
//! condition.

use serde::Deserialize;
use signal_scope_coverage_models::{SignalReport, Tower};

const TOWERS_TOML: &str = include_str!("../seed/towers.toml");
const REPORTS_TOML: &str = include_str!("../seed/reports.toml");

#[derive(Deserialize)]
struct TowerFile {
    tower: Vec<Tower>,
}

#[derive(Deserialize)]
struct ReportFile {
    report: Vec<SignalReport>,
}

/// Returns the bundled sample towers.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed.
#[must_use]
pub fn towers() -> Vec<Tower> {
    toml::de::from_str::<TowerFile>(TOWERS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse seed towers: {e}"))
        .tower
}

/// Returns the bundled sample reports.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed.
#[must_use]
pub fn reports() -> Vec<SignalReport> {
    toml::de::from_str::<ReportFile>(REPORTS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse seed reports: {e}"))
        .report
}
