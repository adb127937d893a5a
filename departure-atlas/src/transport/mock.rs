//! Mock transport backend for running without API access.
//!
//! Serves locations and departure boards from memory, optionally loaded
//! from a JSON fixture file of the form:
//!
//! ```json
//! {
//!   "locations": { "Bern": [46.948, 7.4474] },
//!   "boards": { "Bern": ["Zürich HB", "Thun"] }
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::domain::{BoardEntry, Coordinates};

use super::client::MIN_SEARCH_LEN;
use super::error::TransportError;

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    locations: BTreeMap<String, (f64, f64)>,
    #[serde(default)]
    boards: HashMap<String, Vec<String>>,
}

/// Mock transport backend that serves static data.
///
/// Clones share the request counter.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    locations: BTreeMap<String, Coordinates>,
    boards: HashMap<String, Vec<BoardEntry>>,
    failing: HashSet<String>,
    requests: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TransportError::Fixture(format!("failed to read {path:?}: {e}")))?;
        Self::from_json(&json)
    }

    /// Parse fixture JSON.
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        let fixture: Fixture = serde_json::from_str(json)
            .map_err(|e| TransportError::Fixture(format!("failed to parse fixture: {e}")))?;

        let mut mock = Self::new();
        for (name, (lat, lon)) in fixture.locations {
            let coords = Coordinates::new(lat, lon)
                .map_err(|e| TransportError::Fixture(format!("location {name}: {e}")))?;
            mock.locations.insert(name, coords);
        }
        for (station, destinations) in fixture.boards {
            mock.boards.insert(
                station,
                destinations.into_iter().map(BoardEntry::new).collect(),
            );
        }
        Ok(mock)
    }

    /// Add a location.
    pub fn with_location(mut self, name: &str, coords: Coordinates) -> Self {
        self.locations.insert(name.to_string(), coords);
        self
    }

    /// Set the departure board for a station.
    pub fn with_board(mut self, station: &str, destinations: &[&str]) -> Self {
        self.boards.insert(
            station.to_string(),
            destinations.iter().map(|d| BoardEntry::new(*d)).collect(),
        );
        self
    }

    /// Make every lookup of `name` fail with an API error.
    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Number of lookups served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn check_failure(&self, name: &str) -> Result<(), TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(name) {
            return Err(TransportError::Api {
                status: 503,
                message: format!("mock failure for {name}"),
            });
        }
        Ok(())
    }

    /// Mimics `TransportClient::locate`.
    pub async fn locate(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        self.check_failure(name)?;
        Ok(self.locations.get(name).copied())
    }

    /// Mimics `TransportClient::stationboard`.
    pub async fn stationboard(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        self.check_failure(station)?;
        Ok(self
            .boards
            .get(station)
            .map(|entries| entries.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    /// Mimics `TransportClient::search_stations` with a case-insensitive
    /// substring match over known locations.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<String>, TransportError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(self
            .locations
            .keys()
            .filter(|name| name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
