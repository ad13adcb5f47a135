//! Error handling for dataset building operations.
//!
//! Provides error types with context for endpoint queries, reference source
//! loading, configuration, and output writing.

use crate::constants::RETRYABLE_STATUSES;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure, no HTTP status was received
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Endpoint {endpoint} returned HTTP {status}: {body}")]
    EndpointStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("All {endpoints} Overpass endpoints failed")]
    AllEndpointsFailed { endpoints: usize },

    #[error("Reference source {url} returned HTTP {status}: {body}")]
    ReferenceSource {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse JSON file {}: {source}", .path.display())]
    JsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a transport error for an endpoint
    pub fn request(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a non-success status error for an endpoint
    pub fn endpoint_status(
        endpoint: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::EndpointStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a response decoding error for an endpoint
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create an output serialization error
    pub fn serialize(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            what: what.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// HTTP status carried by an endpoint failure, if one was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::EndpointStatus { status, .. } | Self::ReferenceSource { status, .. } => {
                Some(*status)
            }
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether an endpoint attempt that failed with this error may be retried.
    ///
    /// Rate limiting (429) and gateway timeouts (504) are retryable, as is any
    /// failure that never produced a status (network errors, undecodable bodies).
    pub fn is_retryable(&self) -> bool {
        match self.http_status() {
            Some(status) => RETRYABLE_STATUSES.contains(&status),
            None => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
