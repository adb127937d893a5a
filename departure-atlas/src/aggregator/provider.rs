//! Lookup capabilities the aggregator depends on.
//!
//! These abstractions let the aggregator run against the live API, the
//! moka-cached client, the fixture-backed mock, or test stubs.

use std::future::Future;

use crate::cache::CachedProvider;
use crate::domain::{BoardEntry, Coordinates};
use crate::geo::TileIndex;
use crate::tiles::TileClient;
use crate::transport::{MockTransport, TransportClient, TransportError};

/// Geocoding and departure-board lookups.
pub trait TransportProvider {
    /// Coordinates of the first location matching `name`, or `None`.
    fn lookup_coordinates(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Coordinates>, TransportError>> + Send;

    /// Up to `limit` upcoming departures from `station`.
    fn lookup_departure_board(
        &self,
        station: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<BoardEntry>, TransportError>> + Send;
}

/// Map-tile image lookup.
pub trait TileProvider {
    /// URL of the image for `tile`.
    fn lookup_tile(
        &self,
        tile: TileIndex,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

impl TransportProvider for TransportClient {
    async fn lookup_coordinates(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        self.locate(name).await
    }

    async fn lookup_departure_board(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        self.stationboard(station, limit).await
    }
}

impl TransportProvider for MockTransport {
    async fn lookup_coordinates(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        self.locate(name).await
    }

    async fn lookup_departure_board(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        self.stationboard(station, limit).await
    }
}

impl TileProvider for TileClient {
    async fn lookup_tile(&self, tile: TileIndex) -> Result<String, TransportError> {
        self.resolve(tile).await
    }
}

/// The transport backend chosen at startup.
#[derive(Clone)]
pub enum TransportBackend {
    /// Live API behind the coordinate cache.
    Http(CachedProvider<TransportClient>),
    /// Static fixture data.
    Mock(MockTransport),
}

impl TransportBackend {
    /// Station names for autocomplete.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<String>, TransportError> {
        match self {
            TransportBackend::Http(cached) => cached.inner().search_stations(query).await,
            TransportBackend::Mock(mock) => mock.search_stations(query).await,
        }
    }
}

impl TransportProvider for TransportBackend {
    async fn lookup_coordinates(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        match self {
            TransportBackend::Http(cached) => cached.lookup_coordinates(name).await,
            TransportBackend::Mock(mock) => mock.lookup_coordinates(name).await,
        }
    }

    async fn lookup_departure_board(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        match self {
            TransportBackend::Http(cached) => cached.lookup_departure_board(station, limit).await,
            TransportBackend::Mock(mock) => mock.lookup_departure_board(station, limit).await,
        }
    }
}
