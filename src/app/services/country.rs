//! Country code normalization and country → language resolution
//!
//! OSM spreads the country of a feature over several tags; the first one that
//! normalizes to a two-letter code wins. The resolved code then selects the
//! language whose `name:<lang>` tag is treated as the local name.

use crate::app::models::Tags;
use crate::constants::tags::{CITY_KEYS, COUNTRY_KEYS};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

/// Preferred OSM `name:<lang>` suffix per ISO 3166-1 alpha-2 country
const BUILTIN_COUNTRY_LANGUAGES: &[(&str, &str)] = &[
    // East Asia
    ("CN", "zh"),
    ("TW", "zh"),
    ("HK", "zh"),
    ("MO", "zh"),
    ("JP", "ja"),
    ("KR", "ko"),
    ("KP", "ko"),
    ("MN", "mn"),
    // South-east Asia
    ("TH", "th"),
    ("VN", "vi"),
    ("LA", "lo"),
    ("KH", "km"),
    ("MM", "my"),
    ("MY", "ms"),
    ("BN", "ms"),
    ("ID", "id"),
    ("PH", "tl"),
    // South and central Asia
    ("IN", "hi"),
    ("PK", "ur"),
    ("BD", "bn"),
    ("NP", "ne"),
    ("LK", "si"),
    ("AF", "ps"),
    ("KZ", "kk"),
    ("UZ", "uz"),
    ("KG", "ky"),
    ("TJ", "tg"),
    ("TM", "tk"),
    // Middle East and North Africa
    ("IR", "fa"),
    ("IL", "he"),
    ("TR", "tr"),
    ("SA", "ar"),
    ("AE", "ar"),
    ("QA", "ar"),
    ("KW", "ar"),
    ("BH", "ar"),
    ("OM", "ar"),
    ("YE", "ar"),
    ("IQ", "ar"),
    ("SY", "ar"),
    ("JO", "ar"),
    ("LB", "ar"),
    ("EG", "ar"),
    ("LY", "ar"),
    ("TN", "ar"),
    ("DZ", "ar"),
    ("MA", "ar"),
    ("SD", "ar"),
    // Caucasus
    ("GE", "ka"),
    ("AM", "hy"),
    ("AZ", "az"),
    // Europe
    ("RU", "ru"),
    ("UA", "uk"),
    ("BY", "be"),
    ("DE", "de"),
    ("AT", "de"),
    ("CH", "de"),
    ("LI", "de"),
    ("FR", "fr"),
    ("MC", "fr"),
    ("BE", "nl"),
    ("NL", "nl"),
    ("LU", "lb"),
    ("IT", "it"),
    ("SM", "it"),
    ("ES", "es"),
    ("AD", "ca"),
    ("PT", "pt"),
    ("GR", "el"),
    ("CY", "el"),
    ("PL", "pl"),
    ("CZ", "cs"),
    ("SK", "sk"),
    ("HU", "hu"),
    ("RO", "ro"),
    ("MD", "ro"),
    ("BG", "bg"),
    ("RS", "sr"),
    ("ME", "sr"),
    ("HR", "hr"),
    ("SI", "sl"),
    ("BA", "bs"),
    ("MK", "mk"),
    ("AL", "sq"),
    ("XK", "sq"),
    ("DK", "da"),
    ("NO", "nb"),
    ("SE", "sv"),
    ("FI", "fi"),
    ("IS", "is"),
    ("EE", "et"),
    ("LV", "lv"),
    ("LT", "lt"),
    ("MT", "mt"),
    ("IE", "ga"),
    // Americas
    ("MX", "es"),
    ("GT", "es"),
    ("HN", "es"),
    ("SV", "es"),
    ("NI", "es"),
    ("CR", "es"),
    ("PA", "es"),
    ("CU", "es"),
    ("DO", "es"),
    ("PR", "es"),
    ("CO", "es"),
    ("VE", "es"),
    ("EC", "es"),
    ("PE", "es"),
    ("BO", "es"),
    ("CL", "es"),
    ("AR", "es"),
    ("PY", "es"),
    ("UY", "es"),
    ("BR", "pt"),
    ("HT", "fr"),
    // Sub-Saharan Africa
    ("ET", "am"),
    ("ER", "ti"),
    ("SO", "so"),
    ("AO", "pt"),
    ("MZ", "pt"),
    ("CV", "pt"),
    ("GW", "pt"),
    ("ST", "pt"),
    ("MG", "mg"),
];

/// Uppercase two-letter code, or `None` for absent or wrong-length input
pub fn normalize_country(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim().to_uppercase();
    (trimmed.chars().count() == 2).then_some(trimmed)
}

/// First country tag that normalizes to a two-letter code
pub fn pick_country(tags: &Tags) -> Option<String> {
    COUNTRY_KEYS
        .iter()
        .find_map(|key| normalize_country(tags.get(key)))
}

/// First present city tag
pub fn pick_city(tags: &Tags) -> Option<&str> {
    tags.first_of(CITY_KEYS)
}

/// Static country → language lookup, optionally extended from a JSON file
#[derive(Debug, Clone)]
pub struct CountryLanguages {
    languages: HashMap<String, String>,
}

impl Default for CountryLanguages {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryLanguages {
    /// Lookup preloaded with the built-in table
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_COUNTRY_LANGUAGES.iter().copied())
    }

    pub fn from_pairs<I, C, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        Self {
            languages: pairs
                .into_iter()
                .map(|(country, lang)| (country.into(), lang.into()))
                .collect(),
        }
    }

    /// Language tag for a normalized country code
    pub fn language_for(&self, country: &str) -> Option<&str> {
        self.languages.get(country).map(String::as_str)
    }

    pub fn insert(&mut self, country: impl Into<String>, lang: impl Into<String>) {
        self.languages.insert(country.into(), lang.into());
    }

    /// Number of mapped countries
    pub(crate) fn len(&self) -> usize {
        self.languages.len()
    }

    /// Merge a JSON object of country → language into this lookup
    ///
    /// Keys that do not normalize to a two-letter code and empty languages
    /// are skipped. Returns the number of mappings applied.
    pub fn merge_json(&mut self, json: &str) -> serde_json::Result<usize> {
        let overrides: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut applied = 0;

        for (key, lang) in overrides {
            let lang = lang.trim();
            match normalize_country(Some(&key)) {
                Some(country) if !lang.is_empty() => {
                    self.insert(country, lang);
                    applied += 1;
                }
                _ => warn!("Ignoring country language mapping '{}' -> '{}'", key, lang),
            }
        }

        Ok(applied)
    }

    /// Merge mappings from a JSON file on top of the current table
    ///
    /// # Errors
    /// * `Error::Configuration` if the file does not exist
    /// * `Error::Io` if it cannot be read
    /// * `Error::JsonFile` if it is not a JSON object of strings
    pub fn load_overrides(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(Error::configuration(format!(
                "Country language map not found: {}",
                path.display()
            )));
        }

        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read country language map {}", path.display()), e)
        })?;

        let applied = self.merge_json(&json).map_err(|source| Error::JsonFile {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Applied {} country language mappings from {}",
            applied,
            path.display()
        );
        Ok(applied)
    }
}
