//! Airport Dataset Builder
//!
//! Builds a canonical, ICAO-keyed airport dataset by merging two public
//! sources: aerodrome features from OpenStreetMap, queried through the
//! Overpass API, and the OurAirports reference table.
//!
//! This library provides tools for:
//! - Querying Overpass endpoints with retry, exponential backoff and fallback
//! - Loading the OurAirports CSV from a local cache or over HTTP
//! - Resolving each airport's country, local language and localized names
//! - Reconciling both sources field by field, OSM tags first
//! - Writing a deterministic, versioned JSON document

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AirportEntry, Dataset, DatasetMeta, Feature, OverpassResponse, Tags};
pub use config::Config;
pub use error::{Error, Result};
