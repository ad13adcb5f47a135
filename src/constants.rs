//! Application constants for the airport dataset builder
//!
//! This module contains default endpoints, query text, tag precedence lists
//! and retry defaults used throughout the application.

// =============================================================================
// Overpass (OpenStreetMap) Source
// =============================================================================

/// Primary public Overpass interpreter
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Equivalent public Overpass interpreters, in order of preference
pub const DEFAULT_OVERPASS_FALLBACKS: &[&str] = &[
    DEFAULT_OVERPASS_URL,
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.nchc.org.tw/api/interpreter",
];

/// Aerodromes carrying an ICAO code, as points, ways and relations.
/// Non-point geometries are reduced to their centroid by `out center`.
pub const AERODROME_QUERY: &str = r#"
[out:json][timeout:180];
(
  node["aeroway"="aerodrome"]["icao"];
  way["aeroway"="aerodrome"]["icao"];
  relation["aeroway"="aerodrome"]["icao"];
);
out center tags;
"#;

/// Form field carrying the query in the POST body
pub const OVERPASS_FORM_FIELD: &str = "data";

/// Client-side request timeout, above the 180s the query grants the server
pub const REQUEST_TIMEOUT_SECS: u64 = 240;

/// User agent sent to both upstream sources
pub const USER_AGENT: &str = concat!("airport_dataset/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Retry Defaults
// =============================================================================

/// Retries per endpoint after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base backoff delay, doubled after every retryable failure
pub const DEFAULT_RETRY_BASE_MS: u64 = 1500;

/// HTTP statuses worth retrying on the same endpoint
pub const RETRYABLE_STATUSES: &[u16] = &[429, 504];

// =============================================================================
// OurAirports Reference Source
// =============================================================================

pub const DEFAULT_OURAIRPORTS_URL: &str = "https://ourairports.com/data/airports.csv";

/// Directory under the user cache dir holding the downloaded CSV
pub const CACHE_DIR_NAME: &str = "airport-dataset";

pub const CACHE_FILE_NAME: &str = "ourairports.csv";

/// Column names in the OurAirports airports.csv
pub mod columns {
    pub const IDENT: &str = "ident";
    pub const IATA_CODE: &str = "iata_code";
    pub const NAME: &str = "name";
    pub const MUNICIPALITY: &str = "municipality";
    pub const ISO_COUNTRY: &str = "iso_country";
}

// =============================================================================
// OSM Tag Keys
// =============================================================================

/// Tag keys used during reconciliation
pub mod tags {
    pub const ICAO: &str = "icao";
    pub const IATA: &str = "iata";
    pub const NAME: &str = "name";
    pub const NAME_EN: &str = "name:en";

    /// Country tags, in order of precedence
    pub const COUNTRY_KEYS: &[&str] = &[
        "addr:country",
        "country",
        "country_code",
        "is_in:country_code",
        "ISO3166-1:alpha2",
    ];

    /// City tags, in order of precedence
    pub const CITY_KEYS: &[&str] = &["addr:city", "is_in:city", "city"];

    /// Chinese name tags: Simplified (mainland), Simplified (script), generic, Traditional
    pub const CHINESE_NAME_KEYS: &[&str] =
        &["name:zh-CN", "name:zh-Hans", "name:zh", "name:zh-Hant"];
}

/// Countries whose plain `name` tag is written in Chinese script
pub const CHINESE_SCRIPT_COUNTRIES: &[&str] = &["CN", "TW", "HK", "MO"];

// =============================================================================
// Output Metadata
// =============================================================================

/// Attribution for both upstream sources
pub const SOURCE_ATTRIBUTION: &[&str] = &[
    "OpenStreetMap contributors",
    "OurAirports (public domain)",
];

/// Format of the default dataset version label
pub const VERSION_DATE_FORMAT: &str = "%Y-%m-%d";
