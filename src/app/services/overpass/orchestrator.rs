//! Endpoint fallback with per-endpoint retry and exponential backoff
//!
//! Endpoints are tried in order. Each gets up to `max_retries + 1` attempts;
//! retryable failures (429, 504, or no status at all) wait `base * 2^attempt`
//! before the next attempt on the same endpoint. Any other failure, or running
//! out of attempts, moves on to the next endpoint. Only exhausting every
//! endpoint is fatal.

use super::client::EndpointFetcher;
use crate::app::models::OverpassResponse;
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_MS};
use crate::{Error, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Retry budget for a single endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each later one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total attempts allowed against one endpoint
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait after the failed zero-indexed `attempt`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Return the first successful response from `endpoints`, in order
///
/// # Errors
/// * `Error::Configuration` if `endpoints` is empty
/// * `Error::AllEndpointsFailed` once every endpoint has been abandoned
pub async fn fetch_with_fallback<F>(
    fetcher: &F,
    endpoints: &[String],
    policy: &RetryPolicy,
) -> Result<OverpassResponse>
where
    F: EndpointFetcher + Sync,
{
    if endpoints.is_empty() {
        return Err(Error::configuration("No Overpass endpoints configured"));
    }

    for (index, endpoint) in endpoints.iter().enumerate() {
        match fetch_from_endpoint(fetcher, endpoint, policy).await {
            Ok(response) => {
                info!(
                    "Fetched {} elements from {} (endpoint {} of {})",
                    response.elements.len(),
                    endpoint,
                    index + 1,
                    endpoints.len()
                );
                return Ok(response);
            }
            Err(e) => {
                warn!("Abandoning Overpass endpoint {}: {}", endpoint, e);
            }
        }
    }

    Err(Error::AllEndpointsFailed {
        endpoints: endpoints.len(),
    })
}

/// Try one endpoint until it succeeds, fails non-retryably, or runs out of attempts
async fn fetch_from_endpoint<F>(
    fetcher: &F,
    endpoint: &str,
    policy: &RetryPolicy,
) -> Result<OverpassResponse>
where
    F: EndpointFetcher + Sync,
{
    let mut attempt = 0;

    loop {
        let error = match fetcher.fetch_once(endpoint).await {
            Ok(response) => {
                if attempt > 0 {
                    info!("Overpass succeeded on {} after {} attempts", endpoint, attempt + 1);
                }
                return Ok(response);
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            return Err(error);
        }

        if attempt >= policy.max_retries {
            warn!(
                "Overpass failed after {} attempts: {}",
                attempt + 1,
                endpoint
            );
            return Err(error);
        }

        let delay = policy.backoff_delay(attempt);
        warn!(
            "Overpass retry {}/{} on {} after {}ms: {}",
            attempt + 1,
            policy.max_retries,
            endpoint,
            delay.as_millis(),
            error
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
