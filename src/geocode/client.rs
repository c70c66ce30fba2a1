// src/geocode/client.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const USER_AGENT: &str = "listing-site-builder/0.1 (+static site pipeline)";

/// A resolved coordinate pair for an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// What one external lookup produced. `NotFound` is a definitive answer
/// and is cached as such; transient trouble surfaces as `GeoError`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupOutcome {
    Found(GeoPoint),
    NotFound,
}

#[derive(Debug)]
pub enum GeoError {
    Network(String),
    RateLimited(String),
    BadResponse(String),
}

impl GeoError {
    /// Transient errors are worth another attempt; a malformed response
    /// will not get better by retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, GeoError::Network(_) | GeoError::RateLimited(_))
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Network(msg) => write!(f, "Geocode network error: {msg}"),
            GeoError::RateLimited(msg) => write!(f, "Geocode rate limited: {msg}"),
            GeoError::BadResponse(msg) => write!(f, "Geocode bad response: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

/// The narrow external interface the pipeline needs. Retry and
/// rate-limit policy live in [`crate::geocode::Geocoder`], not here.
pub trait GeoLookup {
    fn lookup(&self, address: &str) -> Result<LookupOutcome, GeoError>;
}

/// Nominatim-style `search?format=json&q=...` endpoint over the blocking
/// reqwest client.
pub struct HttpGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl HttpGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GeoError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeoError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl GeoLookup for HttpGeocoder {
    fn lookup(&self, address: &str) -> Result<LookupOutcome, GeoError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("limit", "1"), ("q", address)])
            .send()
            .map_err(|e| GeoError::Network(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(GeoError::RateLimited(format!("HTTP {status}")));
        }
        if status.is_server_error() {
            return Err(GeoError::Network(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeoError::BadResponse(format!("HTTP {status}")));
        }

        let hits: Vec<SearchHit> = resp
            .json()
            .map_err(|e| GeoError::BadResponse(e.to_string()))?;

        match hits.first() {
            Some(hit) => {
                let lat = hit
                    .lat
                    .parse::<f64>()
                    .map_err(|e| GeoError::BadResponse(format!("lat: {e}")))?;
                let lng = hit
                    .lon
                    .parse::<f64>()
                    .map_err(|e| GeoError::BadResponse(format!("lon: {e}")))?;
                Ok(LookupOutcome::Found(GeoPoint { lat, lng }))
            }
            None => Ok(LookupOutcome::NotFound),
        }
    }
}
