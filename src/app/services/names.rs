//! Local, English and Chinese name derivation from OSM tags
//!
//! Derivation only reads the feature's own tags plus the resolved country;
//! reference-row fallbacks are applied by the reconciler.

use super::country::CountryLanguages;
use crate::app::models::Tags;
use crate::constants::CHINESE_SCRIPT_COUNTRIES;
use crate::constants::tags::{CHINESE_NAME_KEYS, NAME, NAME_EN};

/// Local-language name and the language it was derived for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalName {
    pub name: Option<String>,
    pub lang: Option<String>,
}

/// Derive the local-language name of a feature
///
/// Without a mapped language the plain `name` is returned with no language.
/// With one, `name:<lang>` is preferred; when it is missing the plain `name`
/// is returned and the language is still reported as the one attempted.
/// When neither tag exists both fields are `None`.
pub fn derive_local_name(
    tags: &Tags,
    languages: &CountryLanguages,
    country: Option<&str>,
) -> LocalName {
    let Some(lang) = country.and_then(|code| languages.language_for(code)) else {
        return LocalName {
            name: tags.get(NAME).map(str::to_string),
            lang: None,
        };
    };

    let localized = tags.get(&format!("name:{}", lang));
    match localized.or_else(|| tags.get(NAME)) {
        Some(name) => LocalName {
            name: Some(name.to_string()),
            lang: Some(lang.to_string()),
        },
        None => LocalName::default(),
    }
}

/// `name:en` tag, if present
pub fn derive_english_name(tags: &Tags) -> Option<&str> {
    tags.get(NAME_EN)
}

/// Derive a Chinese-script name
///
/// Tries Simplified (mainland), Simplified (script), generic and Traditional
/// tags in that order. Failing those, the plain `name` is used for countries
/// that write names in Chinese script.
pub fn derive_chinese_name(tags: &Tags, country: Option<&str>) -> Option<String> {
    if let Some(name) = tags.first_of(CHINESE_NAME_KEYS) {
        return Some(name.to_string());
    }

    country
        .filter(|code| CHINESE_SCRIPT_COUNTRIES.contains(code))
        .and_then(|_| tags.get(NAME))
        .map(str::to_string)
}

/// Traditional → Simplified Chinese text conversion
pub trait ScriptConverter: Send + Sync {
    /// Simplified rendering of `text`, or `None` if conversion failed
    fn to_simplified(&self, text: &str) -> Option<String>;
}

/// Converter used when no conversion engine is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScriptConversion;

impl ScriptConverter for NoScriptConversion {
    fn to_simplified(&self, _text: &str) -> Option<String> {
        None
    }
}

impl<F> ScriptConverter for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn to_simplified(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Converter backed by the `zhconv` MediaWiki conversion tables
#[cfg(feature = "script-conversion")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhconvConverter;

#[cfg(feature = "script-conversion")]
impl ScriptConverter for ZhconvConverter {
    fn to_simplified(&self, text: &str) -> Option<String> {
        Some(zhconv::zhconv(text, zhconv::Variant::ZhHans))
    }
}

/// Converter used by the binary: `zhconv` when the `script-conversion`
/// feature is enabled, otherwise none
pub fn default_converter() -> &'static dyn ScriptConverter {
    #[cfg(feature = "script-conversion")]
    {
        &ZhconvConverter
    }
    #[cfg(not(feature = "script-conversion"))]
    {
        &NoScriptConversion
    }
}

/// Simplified rendering of a derived Chinese name
pub fn simplify_chinese_name(
    name: Option<&str>,
    converter: &dyn ScriptConverter,
) -> Option<String> {
    name.and_then(|text| converter.to_simplified(text))
}
