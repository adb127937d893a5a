//! Transport API HTTP client.
//!
//! Provides async methods for the journey-planning provider's `locations`
//! and `stationboard` endpoints, with bounded request concurrency.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{BoardEntry, Coordinates};

use super::error::TransportError;
use super::types::{LocationsResponse, StationboardResponse};

/// Default base URL for the transport API.
pub const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch/v1";

/// Default maximum concurrent requests. One board's worth of destinations.
const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Autocomplete queries shorter than this are not sent.
pub(crate) const MIN_SEARCH_LEN: usize = 2;

/// Configuration for the transport client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TransportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Coordinates of the first location matching `name`.
    ///
    /// Returns `Ok(None)` when the provider has no candidate or the first
    /// candidate has no usable coordinate.
    pub async fn locate(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        let response: LocationsResponse = self.get_json("locations", &[("query", name)]).await?;
        Ok(response.first_coordinates())
    }

    /// Up to `limit` upcoming departures from `station`.
    pub async fn stationboard(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        let limit = limit.to_string();
        let response: StationboardResponse = self
            .get_json("stationboard", &[("station", station), ("limit", limit.as_str())])
            .await?;
        Ok(response.entries())
    }

    /// Station names matching a partial query, for autocomplete.
    ///
    /// Queries shorter than two characters (after trimming) return an empty
    /// list without a request.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<String>, TransportError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        let response: LocationsResponse = self
            .get_json("locations", &[("query", query), ("type", "station")])
            .await?;
        Ok(response.names())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransportError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?query, "transport request");

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransportError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
