//! Reconciliation of Overpass features with OurAirports reference records
//!
//! Each feature is merged with the reference row sharing its ICAO code. OSM
//! tags take precedence field by field; the reference row fills the gaps.
//! Coordinates always come from the feature itself.

use super::country::{CountryLanguages, normalize_country, pick_city, pick_country};
use super::names::{
    ScriptConverter, derive_chinese_name, derive_english_name, derive_local_name,
    simplify_chinese_name,
};
use super::reference_registry::ReferenceRegistry;
use crate::app::models::{AirportEntry, Feature};
use crate::constants::tags::{IATA, ICAO, NAME};
use tracing::{debug, info};

/// Counters from one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Features examined
    pub features_seen: usize,

    /// Features dropped for lacking an `icao` tag
    pub missing_identity: usize,

    /// Entries that found a matching reference record
    pub reference_matches: usize,

    /// Entries produced
    pub entries: usize,
}

/// Merges features with reference records into canonical entries
pub struct Reconciler<'a> {
    registry: &'a ReferenceRegistry,
    languages: &'a CountryLanguages,
    converter: &'a dyn ScriptConverter,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        registry: &'a ReferenceRegistry,
        languages: &'a CountryLanguages,
        converter: &'a dyn ScriptConverter,
    ) -> Self {
        Self {
            registry,
            languages,
            converter,
        }
    }

    /// Reconcile one feature, or `None` if it carries no `icao` tag
    pub fn reconcile(&self, feature: &Feature) -> Option<AirportEntry> {
        let tags = &feature.tags;
        let icao = tags.get(ICAO)?.to_uppercase();
        let reference = self.registry.get(&icao);

        let country = pick_country(tags).or_else(|| {
            normalize_country(reference.and_then(|r| r.iso_country.as_deref()))
        });

        let reference_name = reference.and_then(|r| r.name.as_deref());
        let name = tags.get(NAME).or(reference_name).map(str::to_string);
        let name_en = derive_english_name(tags)
            .or(reference_name)
            .map(str::to_string);

        let local = derive_local_name(tags, self.languages, country.as_deref());
        let name_zh = derive_chinese_name(tags, country.as_deref());
        let name_zh_hans = simplify_chinese_name(name_zh.as_deref(), self.converter);

        let city = pick_city(tags)
            .map(str::to_string)
            .or_else(|| reference.and_then(|r| r.municipality.clone()));
        let iata = tags
            .get(IATA)
            .map(str::to_string)
            .or_else(|| reference.and_then(|r| r.iata.clone()));

        Some(AirportEntry {
            icao,
            iata,
            name_local: local.name.or_else(|| name.clone()),
            name,
            name_en,
            name_zh,
            name_zh_hans,
            local_lang: local.lang,
            country,
            city,
            lat: feature.latitude(),
            lon: feature.longitude(),
        })
    }

    /// Reconcile every feature, keeping input order
    pub fn reconcile_all(&self, features: &[Feature]) -> (Vec<AirportEntry>, ReconcileStats) {
        let mut stats = ReconcileStats {
            features_seen: features.len(),
            ..Default::default()
        };
        let mut entries = Vec::with_capacity(features.len());

        for feature in features {
            match self.reconcile(feature) {
                Some(entry) => {
                    if self.registry.contains(&entry.icao) {
                        stats.reference_matches += 1;
                    }
                    entries.push(entry);
                }
                None => {
                    debug!("Skipping OSM {:?} {} without icao tag", feature.kind, feature.id);
                    stats.missing_identity += 1;
                }
            }
        }

        stats.entries = entries.len();
        info!(
            "Reconciled {} of {} features ({} matched OurAirports, {} without icao)",
            stats.entries, stats.features_seen, stats.reference_matches, stats.missing_identity
        );

        (entries, stats)
    }
}
