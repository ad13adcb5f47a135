//! Run configuration
//!
//! Every tunable of a dataset build is resolved once into an immutable
//! [`Config`] before any network access happens, then threaded through the
//! pipeline by reference.

use crate::app::services::overpass::RetryPolicy;
use crate::constants::{
    CACHE_DIR_NAME, CACHE_FILE_NAME, DEFAULT_OURAIRPORTS_URL, DEFAULT_OVERPASS_FALLBACKS,
};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Resolved configuration for one dataset build
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Overpass endpoints, in fallback order
    pub endpoints: Vec<String>,

    /// OurAirports CSV location
    pub reference_url: String,

    /// Destination of the JSON dataset
    pub output_path: PathBuf,

    /// Local copy of the OurAirports CSV, read if present
    pub cache_path: Option<PathBuf>,

    /// Dataset version label; the run date when absent
    pub dataset_version: Option<String>,

    /// Per-endpoint retry budget
    pub retry: RetryPolicy,

    /// JSON file extending the built-in country language table
    pub country_lang_map: Option<PathBuf>,
}

impl Config {
    /// Configuration with defaults for everything but the output path
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            endpoints: resolve_endpoints(None, None),
            reference_url: DEFAULT_OURAIRPORTS_URL.to_string(),
            output_path: output_path.into(),
            cache_path: default_cache_path(),
            dataset_version: None,
            retry: RetryPolicy::default(),
            country_lang_map: None,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_reference_url(mut self, url: impl Into<String>) -> Self {
        self.reference_url = url.into();
        self
    }

    pub fn with_cache_path(mut self, path: Option<PathBuf>) -> Self {
        self.cache_path = path;
        self
    }

    /// Set the version label; an empty label keeps the date default
    pub fn with_dataset_version(mut self, version: Option<String>) -> Self {
        self.dataset_version = version.filter(|v| !v.trim().is_empty());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_country_lang_map(mut self, path: Option<PathBuf>) -> Self {
        self.country_lang_map = path;
        self
    }

    /// Check the configuration before a run
    ///
    /// # Errors
    /// * `Error::Configuration` for an empty endpoint list, blank URLs or a
    ///   blank output path
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(Error::configuration("No Overpass endpoints configured"));
        }

        if let Some(blank) = self.endpoints.iter().position(|e| e.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "Overpass endpoint #{} is empty",
                blank + 1
            )));
        }

        if self.reference_url.trim().is_empty() {
            return Err(Error::configuration("OurAirports URL is empty"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::configuration("Output path is empty"));
        }

        debug!(
            "Configuration valid: {} endpoints, {} retries, base delay {:?}",
            self.endpoints.len(),
            self.retry.max_retries,
            self.retry.base_delay
        );
        Ok(())
    }
}

/// Resolve the Overpass endpoint list
///
/// A comma-separated `list` with at least one non-blank entry wins. Otherwise
/// a non-blank `single` URL is used alone. Otherwise the public default list.
pub fn resolve_endpoints(list: Option<&str>, single: Option<&str>) -> Vec<String> {
    let listed: Vec<String> = list
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if !listed.is_empty() {
        return listed;
    }

    match single.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => vec![url.to_string()],
        None => DEFAULT_OVERPASS_FALLBACKS
            .iter()
            .map(|url| url.to_string())
            .collect(),
    }
}

/// `<user cache dir>/airport-dataset/ourairports.csv`, if a cache dir exists
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
}
