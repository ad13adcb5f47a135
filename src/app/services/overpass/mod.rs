//! Overpass API access for OpenStreetMap aerodrome features
//!
//! `client` performs one query attempt against one endpoint; `orchestrator`
//! walks a prioritized list of equivalent endpoints with retry and backoff.

pub mod client;
pub mod orchestrator;

#[cfg(test)]
pub mod tests;

pub use client::{EndpointFetcher, OverpassClient, build_http_client};
pub use orchestrator::{RetryPolicy, fetch_with_fallback};
