//! Command-line argument definitions
//!
//! Every option can also be supplied through an environment variable, so the
//! build can run unattended from CI with no flags beyond `--out`.

use crate::app::services::overpass::RetryPolicy;
use crate::config::{Config, default_cache_path, resolve_endpoints};
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_OURAIRPORTS_URL, DEFAULT_RETRY_BASE_MS};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Build a canonical airport dataset from OpenStreetMap and OurAirports
#[derive(Debug, Clone, Parser)]
#[command(
    name = "airport_dataset",
    version,
    about = "Build a canonical ICAO-keyed airport dataset from OpenStreetMap and OurAirports",
    long_about = "Queries an Overpass API endpoint for every aerodrome carrying an ICAO code, \
                  reconciles the results with the OurAirports reference table and writes a \
                  single JSON document keyed by ICAO code. Endpoints are retried with \
                  exponential backoff and fall back to alternates in order."
)]
pub struct Args {
    /// Output path for the generated JSON dataset
    #[arg(long = "out", value_name = "PATH")]
    pub out: PathBuf,

    /// Dataset version label (defaults to today's UTC date)
    #[arg(long = "dataset-version", value_name = "LABEL", env = "DATASET_VERSION")]
    pub dataset_version: Option<String>,

    /// Single Overpass endpoint
    #[arg(long = "overpass", value_name = "URL", env = "OVERPASS_URL")]
    pub overpass: Option<String>,

    /// Comma-separated Overpass endpoints, tried in order
    ///
    /// Takes precedence over --overpass. When neither is given the public
    /// endpoints overpass-api.de, overpass.kumi.systems and
    /// overpass.nchc.org.tw are used.
    #[arg(long = "overpass-list", value_name = "URL,URL,..", env = "OVERPASS_URLS")]
    pub overpass_list: Option<String>,

    /// OurAirports airports.csv location
    #[arg(
        long = "ourairports",
        value_name = "URL",
        env = "OURAIRPORTS_URL",
        default_value = DEFAULT_OURAIRPORTS_URL
    )]
    pub ourairports: String,

    /// Local copy of airports.csv, used instead of downloading when present
    #[arg(long = "cache", value_name = "PATH", env = "OURAIRPORTS_CACHE")]
    pub cache: Option<PathBuf>,

    /// Retries per Overpass endpoint after the first attempt
    #[arg(
        long = "retries",
        value_name = "N",
        env = "OVERPASS_RETRIES",
        default_value_t = DEFAULT_MAX_RETRIES
    )]
    pub retries: u32,

    /// Base backoff delay in milliseconds, doubled after each retry
    #[arg(
        long = "retry-base-ms",
        value_name = "MS",
        env = "OVERPASS_RETRY_BASE_MS",
        default_value_t = DEFAULT_RETRY_BASE_MS
    )]
    pub retry_base_ms: u64,

    /// JSON object of country code to language, merged over the built-in table
    #[arg(long = "country-lang-map", value_name = "PATH", env = "COUNTRY_LANG_MAP")]
    pub country_lang_map: Option<PathBuf>,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Determine the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Resolve the arguments into a run configuration
    pub fn to_config(&self) -> Config {
        let endpoints =
            resolve_endpoints(self.overpass_list.as_deref(), self.overpass.as_deref());

        Config::new(self.out.clone())
            .with_endpoints(endpoints)
            .with_reference_url(self.ourairports.clone())
            .with_cache_path(self.cache.clone().or_else(default_cache_path))
            .with_dataset_version(self.dataset_version.clone())
            .with_retry(RetryPolicy::new(
                self.retries,
                Duration::from_millis(self.retry_base_ms),
            ))
            .with_country_lang_map(self.country_lang_map.clone())
    }
}
