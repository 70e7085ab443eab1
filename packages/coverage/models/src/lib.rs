#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Tower, signal report, and carrier comparison types.
//!
//! This crate defines the shared vocabulary of the `SignalScope` system:
//! the closed set of carriers, the tower and crowd-sourced report records
//! that make up a coverage snapshot, and the derived per-carrier
//! comparison produced by the coverage scorer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Weakest signal strength (dBm) accepted on a report submission.
pub const MIN_REPORT_SIGNAL_DBM: i32 = -150;

/// Strongest signal strength (dBm) accepted on a report submission.
pub const MAX_REPORT_SIGNAL_DBM: i32 = 0;

/// A point in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// The closed set of carriers that operate towers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Carrier {
    /// T-Mobile US.
    #[serde(rename = "T-Mobile")]
    #[strum(serialize = "T-Mobile")]
    TMobile,
    /// Verizon Wireless.
    #[serde(rename = "Verizon")]
    #[strum(serialize = "Verizon")]
    Verizon,
    /// AT&T Mobility.
    #[serde(rename = "AT&T")]
    #[strum(serialize = "AT&T")]
    Att,
}

impl Carrier {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TMobile, Self::Verizon, Self::Att]
    }

    /// Maps a free-text carrier name (as typed on a report) onto the
    /// closed carrier set.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_report_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Whether a free-text carrier name refers to this carrier.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        Self::from_report_name(name) == Some(self)
    }
}

/// Radio technology supported by a tower.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RadioTech {
    /// 4G LTE.
    #[serde(rename = "LTE")]
    #[strum(serialize = "LTE")]
    Lte,
    /// 5G NR.
    #[serde(rename = "5G")]
    #[strum(serialize = "5G")]
    FiveG,
}

/// A stationary transmission site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tower {
    /// Stable identifier.
    pub id: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Carrier operating this tower.
    pub operator: Carrier,
    /// Structure height. The unit is a display concern.
    pub height: u32,
    /// Supported radio technologies (never empty).
    pub tech: Vec<RadioTech>,
}

impl Tower {
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Whether this tower advertises the given technology.
    #[must_use]
    pub fn supports(&self, tech: RadioTech) -> bool {
        self.tech.contains(&tech)
    }
}

/// A user-submitted point measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    /// Identifier generated at submission time.
    pub id: String,
    /// Latitude of the measurement.
    pub lat: f64,
    /// Longitude of the measurement.
    pub lng: f64,
    /// Carrier name as entered by the user.
    pub carrier: String,
    /// Measured signal strength in dBm (more negative is weaker).
    pub signal_strength: i32,
    /// Device model. Descriptive only.
    pub device: String,
    /// When the report was submitted.
    pub timestamp: DateTime<Utc>,
}

impl SignalReport {
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A report submission before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSignalReport {
    /// Latitude of the measurement.
    pub lat: f64,
    /// Longitude of the measurement.
    pub lng: f64,
    /// Carrier name as entered by the user.
    pub carrier: String,
    /// Measured signal strength in dBm.
    pub signal_strength: i32,
    /// Device model.
    pub device: String,
}

/// Reasons a report submission is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportValidationError {
    /// Latitude is not a finite value in `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude is not a finite value in `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    /// Carrier name is blank.
    #[error("carrier must not be empty")]
    EmptyCarrier,
    /// Signal strength is outside the accepted dBm range.
    #[error("signal strength {0} dBm is outside [-150, 0]")]
    SignalStrength(i32),
}

impl NewSignalReport {
    /// Checks the submission before it is accepted into a report set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReportValidationError`] found.
    pub fn validate(&self) -> Result<(), ReportValidationError> {
        if !(self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)) {
            return Err(ReportValidationError::Latitude(self.lat));
        }
        if !(self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)) {
            return Err(ReportValidationError::Longitude(self.lng));
        }
        if self.carrier.trim().is_empty() {
            return Err(ReportValidationError::EmptyCarrier);
        }
        if !(MIN_REPORT_SIGNAL_DBM..=MAX_REPORT_SIGNAL_DBM).contains(&self.signal_strength) {
            return Err(ReportValidationError::SignalStrength(self.signal_strength));
        }
        Ok(())
    }

    /// Stamps the submission with the given id and timestamp.
    #[must_use]
    pub fn into_report_at(self, id: String, timestamp: DateTime<Utc>) -> SignalReport {
        SignalReport {
            id,
            lat: self.lat,
            lng: self.lng,
            carrier: self.carrier.trim().to_string(),
            signal_strength: self.signal_strength,
            device: self.device,
            timestamp,
        }
    }

    /// Stamps the submission with a fresh id and the current time.
    #[must_use]
    pub fn into_report(self) -> SignalReport {
        let id = format!("r{}", uuid::Uuid::new_v4().simple());
        self.into_report_at(id, Utc::now())
    }
}

/// Recommendation tier derived from a coverage score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Recommendation {
    /// Score of 75 or more.
    Best,
    /// Score of 50 to 74.
    Good,
    /// Score of 25 to 49.
    Fair,
    /// Score below 25.
    Poor,
}

impl Recommendation {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            75.. => Self::Best,
            50..=74 => Self::Good,
            25..=49 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// The coverage scorer's output for one carrier at one query point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierComparison {
    /// Carrier being scored.
    pub carrier: Carrier,
    /// Measured or estimated signal in dBm, rounded.
    pub avg_signal: i32,
    /// Towers of this carrier within the radius.
    pub tower_count: usize,
    /// Synthetic coverage score, 0-100.
    pub coverage_score: u8,
    /// Tier derived from the score.
    pub recommendation: Recommendation,
}

/// Display bucket for a signal strength, as drawn in the map legend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SignalQuality {
    /// -50 to -1 dBm.
    Excellent,
    /// -80 to -51 dBm.
    Good,
    /// -100 to -81 dBm.
    Poor,
    /// Weaker than -100 dBm, and anything outside the legend (including
    /// `0` and above).
    VeryPoor,
}

impl SignalQuality {
    /// Legend bucket for `dbm`. Each legend band excludes its upper bound,
    /// so `0 dBm` falls through to [`Self::VeryPoor`].
    #[must_use]
    pub const fn from_dbm(dbm: i32) -> Self {
        match dbm {
            -50..=-1 => Self::Excellent,
            -80..=-51 => Self::Good,
            -100..=-81 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }

    /// Returns all variants of this enum, strongest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Excellent, Self::Good, Self::Poor, Self::VeryPoor]
    }

    /// Human-readable legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

/// What kind of place a favorite is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FavoriteKind {
    Home,
    Work,
    Custom,
}

/// A user-named point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteLocation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
}

impl FavoriteLocation {
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A favorite before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFavorite {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
}

impl NewFavorite {
    #[must_use]
    pub fn into_favorite(self, id: String) -> FavoriteLocation {
        FavoriteLocation {
            id,
            name: self.name,
            lat: self.lat,
            lng: self.lng,
            kind: self.kind,
        }
    }
}

/// Anything drawn as a pin on the coverage map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapMarker {
    /// A transmission site.
    Tower(Tower),
    /// A crowd-sourced measurement.
    Report(SignalReport),
}

impl MapMarker {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Tower(tower) => &tower.id,
            Self::Report(report) => &report.id,
        }
    }

    #[must_use]
    pub const fn position(&self) -> LatLng {
        match self {
            Self::Tower(tower) => tower.position(),
            Self::Report(report) => report.position(),
        }
    }
}

/// A tower paired with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyTower {
    pub tower: Tower,
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
}

/// Number of towers operated by one carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierCount {
    pub carrier: Carrier,
    pub count: usize,
}

/// Mean reported signal for one carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierSignal {
    pub carrier: Carrier,
    /// Mean of report signal strengths in dBm, rounded.
    pub avg_signal: i32,
    pub report_count: usize,
}

/// Number of reports falling in one signal quality bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityCount {
    pub quality: SignalQuality,
    pub count: usize,
}
