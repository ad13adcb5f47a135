//! Data models for airport dataset building
//!
//! This module contains the data structures for the two upstream sources
//! (Overpass elements and OurAirports rows) and for the reconciled output.

use crate::constants::SOURCE_ATTRIBUTION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// OSM Tag Set
// =============================================================================

/// Free-form OSM key/value attributes of a single feature
///
/// Lookups return an explicit `Option`. [`Tags::get`] treats an empty value the
/// same as a missing key, which is what every derivation rule expects;
/// [`Tags::raw`] exposes the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Stored value for `key`, including empty strings
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).filter(|value| !value.is_empty())
    }

    /// First non-empty value among `keys`, in order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

// =============================================================================
// Overpass Response
// =============================================================================

/// OSM geometry kind of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

/// A latitude/longitude pair in WGS84 decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// A tagged map feature as returned by Overpass (`out center tags`)
///
/// Nodes carry `lat`/`lon` directly; ways and relations carry a `center`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: ElementKind,

    #[serde(default)]
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,

    #[serde(default)]
    pub tags: Tags,
}

impl Feature {
    /// Latitude of the point, or of the centroid for areas and relations
    pub fn latitude(&self) -> Option<f64> {
        self.lat.or_else(|| self.center.map(|c| c.lat))
    }

    /// Longitude of the point, or of the centroid for areas and relations
    pub fn longitude(&self) -> Option<f64> {
        self.lon.or_else(|| self.center.map(|c| c.lon))
    }
}

/// Body of a successful Overpass query
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Feature>,
}

// =============================================================================
// OurAirports Reference Record
// =============================================================================

/// One OurAirports row reduced to the fields used for reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    /// Uppercased `ident` column, the index key
    pub icao: String,
    pub iata: Option<String>,
    pub name: Option<String>,
    pub municipality: Option<String>,
    pub iso_country: Option<String>,
}

// =============================================================================
// Output
// =============================================================================

/// Reconciled airport, one per ICAO code
///
/// Every field except `icao` may be null when neither source supplies it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AirportEntry {
    pub icao: String,
    pub iata: Option<String>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub name_local: Option<String>,
    pub name_zh: Option<String>,
    pub name_zh_hans: Option<String>,
    pub local_lang: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Provenance block of the output artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetMeta {
    pub dataset_version: String,
    pub generated_at: String,
    pub sources: Vec<String>,
}

impl DatasetMeta {
    pub fn new(dataset_version: String, generated_at: String) -> Self {
        Self {
            dataset_version,
            generated_at,
            sources: SOURCE_ATTRIBUTION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The final artifact: metadata plus airports keyed by ICAO code
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dataset {
    pub meta: DatasetMeta,
    pub airports: BTreeMap<String, AirportEntry>,
}

impl Dataset {
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn get(&self, icao: &str) -> Option<&AirportEntry> {
        self.airports.get(icao)
    }
}
