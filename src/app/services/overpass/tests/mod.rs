//! Shared test fixtures for Overpass fetch tests

use crate::app::models::{Feature, OverpassResponse, Tags};
use crate::app::services::overpass::EndpointFetcher;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;


/// How a scripted endpoint answers every attempt
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Always fail with this HTTP status
    Status(u16),
    /// Always fail without a status (connection-level failure)
    Unreachable,
    /// Always succeed with a response naming this ICAO code
    Succeed(&'static str),
    /// Fail `failures` times with `status`, then succeed
    FailThenSucceed {
        failures: usize,
        status: u16,
        icao: &'static str,
    },
}

/// Fetcher answering from a per-endpoint script and recording every attempt
pub struct ScriptedFetcher {
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    pub fn new(behaviors: &[(&str, Behavior)]) -> Self {
        Self {
            behaviors: behaviors
                .iter()
                .map(|(endpoint, behavior)| (endpoint.to_string(), behavior.clone()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self, endpoint: &str) -> usize {
        self.attempt_times(endpoint).len()
    }

    pub fn attempt_times(&self, endpoint: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| called == endpoint)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn total_attempts(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl EndpointFetcher for ScriptedFetcher {
    async fn fetch_once(&self, endpoint: &str) -> Result<OverpassResponse> {
        let previous_attempts = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|(called, _)| called == endpoint).count();
            calls.push((endpoint.to_string(), Instant::now()));
            previous
        };

        match self.behaviors.get(endpoint) {
            Some(Behavior::Status(status)) => {
                Err(Error::endpoint_status(endpoint, *status, "scripted"))
            }
            Some(Behavior::Unreachable) => Err(unreachable_error(endpoint)),
            Some(Behavior::Succeed(icao)) => Ok(response_with(icao)),
            Some(Behavior::FailThenSucceed {
                failures,
                status,
                icao,
            }) => {
                if previous_attempts < *failures {
                    Err(Error::endpoint_status(endpoint, *status, "scripted"))
                } else {
                    Ok(response_with(icao))
                }
            }
            None => Err(Error::endpoint_status(endpoint, 404, "unknown endpoint")),
        }
    }
}

/// A failure that carries no HTTP status
pub fn unreachable_error(endpoint: &str) -> Error {
    let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    Error::decode(endpoint, source)
}

/// Response holding a single aerodrome node
pub fn response_with(icao: &str) -> OverpassResponse {
    let tags: Tags = [("aeroway", "aerodrome"), ("icao", icao)].into_iter().collect();
    OverpassResponse {
        elements: vec![Feature {
            id: 1,
            lat: Some(1.0),
            lon: Some(2.0),
            tags,
            ..Default::default()
        }],
    }
}

pub fn endpoints(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
