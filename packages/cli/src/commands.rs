//! Command implementations shared by the flag-driven and interactive modes.
//!
//! Each command reads the bundled seed snapshot, runs one coverage query
//! and returns the rendered text.

use std::path::Path;

use signal_scope_coverage::{Snapshot, analytics, distance_between};
use signal_scope_coverage_models::{Carrier, LatLng};
use signal_scope_favorites::{Favorites, JsonFileStore};
use signal_scope_geocoder::Resolution;

use crate::report;

type CommandResult = Result<String, Box<dyn std::error::Error>>;

/// Where a command should be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Explicit coordinates.
    Point(LatLng),
    /// Free text passed through the location resolver.
    Query(String),
}

impl Location {
    /// Builds a location from optional coordinates and an optional query.
    /// Coordinates win when both are present.
    ///
    /// # Errors
    ///
    /// Returns an error if only one coordinate is given, or neither
    /// coordinates nor a query.
    pub fn from_parts(
        lat: Option<f64>,
        lng: Option<f64>,
        query: Option<String>,
    ) -> Result<Self, String> {
        match (lat, lng, query) {
            (Some(lat), Some(lng), _) => Ok(Self::Point(LatLng::new(lat, lng))),
            (Some(_), None, _) | (None, Some(_), _) => {
                Err("--lat and --lng must be given together".to_string())
            }
            (None, None, Some(q)) if !q.trim().is_empty() => Ok(Self::Query(q)),
            _ => Err("Give a location query or --lat and --lng".to_string()),
        }
    }

    /// Resolves to a point, with resolver provenance for queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query does not resolve.
    pub fn resolve(&self) -> Result<(LatLng, Option<Resolution>), String> {
        match self {
            Self::Point(point) => Ok((*point, None)),
            Self::Query(q) => signal_scope_geocoder::resolve_detailed(q)
                .map(|resolution| (resolution.point, Some(resolution)))
                .ok_or_else(|| format!("Location not found: {q}")),
        }
    }
}

/// Parses a carrier name.
///
/// # Errors
///
/// Returns an error naming the known carriers if `name` is not one.
pub fn parse_carrier(name: &str) -> Result<Carrier, String> {
    Carrier::from_report_name(name).ok_or_else(|| {
        let known: Vec<String> = Carrier::all().iter().map(ToString::to_string).collect();
        format!("Unknown carrier {name:?} (expected one of {})", known.join(", "))
    })
}

/// Parses a comma-separated carrier list. An empty or missing list means
/// every carrier.
///
/// # Errors
///
/// Returns an error on the first unknown carrier name.
pub fn parse_carrier_list(raw: Option<&str>) -> Result<Vec<Carrier>, String> {
    let carriers = raw
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(parse_carrier)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    if carriers.is_empty() {
        Ok(Carrier::all().to_vec())
    } else {
        Ok(carriers)
    }
}

fn resolution_header(resolution: Option<&Resolution>) -> String {
    resolution.map_or_else(String::new, |r| {
        format!("Resolved to {}\n\n", report::resolution_line(r))
    })
}

/// Ranks carriers at a location.
///
/// # Errors
///
/// Returns an error if the location does not resolve.
pub fn compare(location: &Location, radius_km: f64, carriers: &[Carrier]) -> CommandResult {
    if !(radius_km.is_finite() && radius_km >= 0.0) {
        return Err(format!("Invalid radius: {radius_km}").into());
    }

    let (center, resolution) = location.resolve()?;
    let comparisons = Snapshot::seeded().compare(center, radius_km, carriers);

    Ok(format!(
        "{}{}",
        resolution_header(resolution.as_ref()),
        report::comparison_table(center, radius_km, &comparisons)
    ))
}

/// Ranks every carrier at a saved favorite, looked up by id or
/// case-insensitive name.
///
/// # Errors
///
/// Returns an error if the favorites file cannot be read or no favorite
/// matches.
pub fn compare_favorite(favorites_path: &Path, favorite: &str, radius_km: f64) -> CommandResult {
    log::info!("Loading favorites from {}", favorites_path.display());
    let favorites = Favorites::load(&JsonFileStore::new(favorites_path))?;
    let found = favorites
        .get(favorite)
        .or_else(|| {
            favorites
                .all()
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(favorite.trim()))
        })
        .ok_or_else(|| format!("Favorite not found: {favorite}"))?;

    let header = format!("Favorite {} ({})\n\n", found.name, found.kind);
    let table = compare(&Location::Point(found.position()), radius_km, Carrier::all())?;
    Ok(format!("{header}{table}"))
}

/// Resolves free text and describes the match.
///
/// # Errors
///
/// Returns an error if the query does not resolve.
pub fn resolve(query: &str) -> CommandResult {
    let resolution = signal_scope_geocoder::resolve_detailed(query)
        .ok_or_else(|| format!("Location not found: {query}"))?;
    Ok(report::resolution_line(&resolution))
}

/// Great-circle distance between two locations.
///
/// # Errors
///
/// Returns an error if either location does not resolve.
pub fn distance(from: &Location, to: &Location) -> CommandResult {
    let (a, _) = from.resolve()?;
    let (b, _) = to.resolve()?;
    Ok(format!("{:.3} km from {a} to {b}", distance_between(a, b)))
}

/// The towers closest to a location.
///
/// # Errors
///
/// Returns an error if the location does not resolve.
pub fn nearest(location: &Location, limit: usize, carrier: Option<Carrier>) -> CommandResult {
    let (center, resolution) = location.resolve()?;
    let snapshot = Snapshot::seeded();
    let towers = analytics::nearest_towers(&snapshot.towers, center, limit, carrier);

    Ok(format!(
        "{}{}",
        resolution_header(resolution.as_ref()),
        report::nearest_table(center, &towers)
    ))
}

/// Summary charts for the seed snapshot.
#[must_use]
pub fn analytics() -> String {
    let snapshot = Snapshot::seeded();
    report::analytics_summary(
        snapshot.towers.len(),
        snapshot.reports.len(),
        &analytics::towers_by_carrier(&snapshot.towers),
        &analytics::average_signal_by_carrier(&snapshot.reports),
        &analytics::signal_quality_breakdown(&snapshot.reports),
    )
}

#[cfg(test)]
mod tests {
    use signal_scope_coverage::DEFAULT_RADIUS_KM;
    use signal_scope_coverage_models::{FavoriteKind, NewFavorite};
    use signal_scope_favorites::FavoritesStore as _;

    use super::*;

    fn query(q: &str) -> Location {
        Location::Query(q.to_string())
    }

    #[test]
    fn coordinates_win_over_query() {
        let location = Location::from_parts(Some(1.0), Some(2.0), Some("nyc".to_string()));
        assert_eq!(location, Ok(Location::Point(LatLng::new(1.0, 2.0))));
    }

    #[test]
    fn location_needs_both_coordinates_or_a_query() {
        assert!(Location::from_parts(Some(1.0), None, None).is_err());
        assert!(Location::from_parts(None, None, None).is_err());
        assert!(Location::from_parts(None, None, Some("  ".to_string())).is_err());
    }

    #[test]
    fn carrier_list_parsing() {
        assert_eq!(parse_carrier_list(None), Ok(Carrier::all().to_vec()));
        assert_eq!(
            parse_carrier_list(Some("at&t, t-mobile")),
            Ok(vec![Carrier::Att, Carrier::TMobile])
        );
        assert!(parse_carrier_list(Some("verizon,sprint")).is_err());
    }

    #[test]
    fn compare_by_query_includes_resolution() {
        let out = compare(&query("nyc"), DEFAULT_RADIUS_KM, Carrier::all()).unwrap();
        assert!(out.starts_with("Resolved to 40.7128, -74.0060 (New York"));
        assert!(out.contains("T-Mobile"));
    }

    #[test]
    fn compare_unknown_place_fails() {
        assert!(compare(&query("zzz-not-a-place"), DEFAULT_RADIUS_KM, Carrier::all()).is_err());
    }

    #[test]
    fn compare_rejects_negative_radius() {
        assert!(compare(&query("nyc"), -1.0, Carrier::all()).is_err());
    }

    #[test]
    fn distance_between_cities() {
        let out = distance(&query("nyc"), &query("los angeles")).unwrap();
        assert!(out.starts_with("3935.7"), "{out}");
    }

    #[test]
    fn nearest_respects_carrier_filter() {
        let out = nearest(&query("nyc"), 10, Some(Carrier::Verizon)).unwrap();
        assert!(out.contains("Verizon"));
        assert!(!out.contains("T-Mobile"));
    }

    #[test]
    fn resolve_unknown_place_fails() {
        assert!(resolve("10001").is_err());
        assert_eq!(
            resolve("40.7128, -74.0060").unwrap(),
            "40.7128, -74.0060 (coordinates)"
        );
    }

    #[test]
    fn analytics_covers_seed_data() {
        let out = analytics();
        assert!(out.starts_with("Towers: 8  Reports: 3"));
    }

    #[test]
    fn compare_favorite_by_name() {
        let path = std::env::temp_dir()
            .join(format!("signal-scope-cli-{}", uuid::Uuid::new_v4().simple()))
            .join("favorites.json");
        let store = JsonFileStore::new(&path);
        let mut favorites = Favorites::default();
        favorites.add(NewFavorite {
            name: "Home".to_string(),
            lat: 40.7128,
            lng: -74.0060,
            kind: FavoriteKind::Home,
        });
        favorites.save(&store).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        let out = compare_favorite(&path, "home", DEFAULT_RADIUS_KM).unwrap();
        assert!(out.starts_with("Favorite Home (home)"));
        assert!(compare_favorite(&path, "work", DEFAULT_RADIUS_KM).is_err());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
