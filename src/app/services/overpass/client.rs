//! Single-attempt Overpass query execution
//!
//! One call is one try against one endpoint. Retry and fallback live in the
//! orchestrator.

use crate::app::models::OverpassResponse;
use crate::constants::{AERODROME_QUERY, OVERPASS_FORM_FIELD, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Executes one query attempt against one endpoint
pub trait EndpointFetcher {
    /// Query `endpoint` once.
    ///
    /// Fails with `Error::EndpointStatus` on a non-success status, with
    /// `Error::Request` on transport failure, and with `Error::Decode` when the
    /// body is not a valid Overpass response.
    fn fetch_once(&self, endpoint: &str) -> impl Future<Output = Result<OverpassResponse>> + Send;
}

/// Build the HTTP client shared by both upstream sources
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// reqwest-backed fetcher posting the aerodrome query as a form body
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
}

impl OverpassClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl EndpointFetcher for OverpassClient {
    async fn fetch_once(&self, endpoint: &str) -> Result<OverpassResponse> {
        debug!("Querying Overpass endpoint {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .form(&[(OVERPASS_FORM_FIELD, AERODROME_QUERY)])
            .send()
            .await
            .map_err(|e| Error::request(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::request(endpoint, e))?;

        if !status.is_success() {
            return Err(Error::endpoint_status(
                endpoint,
                status.as_u16(),
                truncate_body(&text),
            ));
        }

        let payload: OverpassResponse =
            serde_json::from_str(&text).map_err(|e| Error::decode(endpoint, e))?;

        debug!(
            "Endpoint {} returned {} elements",
            endpoint,
            payload.elements.len()
        );
        Ok(payload)
    }
}

fn truncate_body(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    }
}
