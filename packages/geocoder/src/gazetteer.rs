//! Static city-name-to-coordinate table.
//!
//! Cities and their aliases are defined in `data/gazetteer.toml`, embedded
//! at compile time and indexed once on first use. Every name and alias is
//! normalized into a lookup key.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use signal_scope_coverage_models::LatLng;

use crate::normalize::normalize;

const GAZETTEER_TOML: &str = include_str!("../data/gazetteer.toml");

/// Keys shorter than this (`la`, `sf`, `nyc`) are only found inside a
/// query as a whole word, so `la` does not match `"place"`.
pub const MIN_SUBSTRING_KEY_LEN: usize = 4;

/// A city entry as written in the TOML file.
#[derive(Debug, Clone, Deserialize)]
struct CityDefinition {
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    city: Vec<CityDefinition>,
}

/// A resolved gazetteer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Canonical city name.
    pub name: String,
    /// Fixed coordinate for the city.
    pub point: LatLng,
}

/// Normalized key -> place. `BTreeMap` iteration order is what makes the
/// fuzzy tie-break deterministic.
static INDEX: LazyLock<BTreeMap<String, Place>> = LazyLock::new(build_index);

fn build_index() -> BTreeMap<String, Place> {
    let file: GazetteerFile = toml::de::from_str(GAZETTEER_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse gazetteer: {e}"));

    let mut index: BTreeMap<String, Place> = BTreeMap::new();
    for city in file.city {
        let place = Place {
            name: city.name.clone(),
            point: LatLng::new(city.lat, city.lng),
        };
        for key in std::iter::once(&city.name).chain(&city.aliases) {
            let key = normalize(key);
            if key.is_empty() {
                continue;
            }
            if let Some(existing) = index.get(&key) {
                log::warn!(
                    "Gazetteer key {key:?} for {} already maps to {}",
                    city.name,
                    existing.name
                );
                continue;
            }
            index.insert(key, place.clone());
        }
    }
    index
}

/// Looks up a normalized query as an exact key.
#[must_use]
pub fn lookup_exact(query: &str) -> Option<&'static Place> {
    INDEX.get(query)
}

fn key_in_query(key: &str, query: &str) -> bool {
    if key.len() < MIN_SUBSTRING_KEY_LEN {
        query.split(' ').any(|word| word == key)
    } else {
        query.contains(key)
    }
}

/// Finds the best substring match for a normalized query.
///
/// Candidates are keys contained in the query, or keys containing the
/// query. The longest candidate key wins; among keys of equal length the
/// alphabetically first one wins. Returns the matched key with its place.
#[must_use]
pub fn lookup_fuzzy(query: &str) -> Option<(&'static str, &'static Place)> {
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(&'static str, &'static Place)> = None;

    for (key, place) in INDEX.iter() {
        if !(key_in_query(key, query) || key.contains(query)) {
            continue;
        }
        match best {
            Some((current, _)) if key.len() <= current.len() => {}
            _ => best = Some((key.as_str(), place)),
        }
    }

    best
}

/// All lookup keys, in the order fuzzy matching visits them.
pub fn keys() -> impl Iterator<Item = &'static str> {
    INDEX.keys().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn parses_embedded_file() {
        let file: GazetteerFile = toml::de::from_str(GAZETTEER_TOML).unwrap();
        assert!(!file.city.is_empty());
        for city in &file.city {
            assert!(!city.name.is_empty());
            assert!((-90.0..=90.0).contains(&city.lat), "{} lat", city.name);
            assert!((-180.0..=180.0).contains(&city.lng), "{} lng", city.name);
        }
    }

    #[test]
    fn keys_are_unique_across_cities() {
        let file: GazetteerFile = toml::de::from_str(GAZETTEER_TOML).unwrap();
        let mut seen = BTreeSet::new();
        for city in &file.city {
            for key in std::iter::once(&city.name).chain(&city.aliases) {
                assert!(seen.insert(normalize(key)), "Duplicate key: {key}");
            }
        }
    }

    #[test]
    fn keys_are_normalized() {
        for key in keys() {
            assert_eq!(key, normalize(key));
        }
    }

    #[test]
    fn exact_lookup_by_name_and_alias() {
        let by_name = lookup_exact("new york").unwrap();
        let by_alias = lookup_exact("nyc").unwrap();
        assert_eq!(by_name, by_alias);
        assert_eq!(by_name.name, "New York");
        assert_eq!(by_name.point, LatLng::new(40.7128, -74.0060));
    }

    #[test]
    fn exact_lookup_misses() {
        assert!(lookup_exact("atlantis").is_none());
        assert!(lookup_exact("New York").is_none());
    }

    #[test]
    fn fuzzy_prefers_longest_key() {
        let (key, place) = lookup_fuzzy("downtown new york city").unwrap();
        assert_eq!(key, "new york city");
        assert_eq!(place.name, "New York");
    }

    #[test]
    fn fuzzy_matches_partial_query() {
        let (key, place) = lookup_fuzzy("seatt").unwrap();
        assert_eq!(key, "seattle");
        assert_eq!(place.name, "Seattle");
    }

    #[test]
    fn fuzzy_tie_goes_to_alphabetically_first_key() {
        let (key, _) = lookup_fuzzy("san ").unwrap();
        assert_eq!(key, "san francisco");

        // "san fran" and "san jose" are both 8 characters.
        let (key, _) = lookup_fuzzy("san fran or san jose").unwrap();
        assert_eq!(key, "san fran");
    }

    #[test]
    fn short_aliases_match_whole_words_only() {
        assert!(lookup_fuzzy("zzz-not-a-place").is_none());
        assert!(lookup_fuzzy("atlasville").is_none());

        let (key, place) = lookup_fuzzy("in la today").unwrap();
        assert_eq!(key, "la");
        assert_eq!(place.name, "Los Angeles");
    }

    #[test]
    fn short_alias_inside_longer_query() {
        let (key, place) = lookup_fuzzy("downtown phx").unwrap();
        assert_eq!(key, "phx");
        assert_eq!(place.name, "Phoenix");

        let (key, place) = lookup_fuzzy("brooklyn nyc").unwrap();
        assert_eq!(key, "nyc");
        assert_eq!(place.name, "New York");
    }

    #[test]
    fn short_query_matches_inside_keys() {
        let (key, place) = lookup_fuzzy("ph").unwrap();
        assert_eq!(key, "philadelphia");
        assert_eq!(place.name, "Philadelphia");
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(lookup_fuzzy("").is_none());
    }
}
