//! Connection aggregation.
//!
//! Turns a station name into a [`Connection`]: the departure station plus
//! every destination on its departure board, each placed by geocoding and
//! annotated with its great-circle distance from the departure.
//!
//! The pipeline for one resolution:
//! 1. geocode the departure (failure: [`AggregateError::StationNotFound`])
//! 2. look up the departure's map tile, concurrently with everything after
//!    and within [`AggregatorConfig::tile_timeout`]
//! 3. fetch the departure board (empty: [`AggregateError::NoScheduleData`])
//! 4. geocode every destination concurrently, skipping failures
//! 5. publish the connection if no newer resolution has started

mod config;
mod error;
mod events;
mod provider;
mod slot;


use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::broadcast;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::{BoardEntry, Connection, Station, StationQuery};
use crate::geo::tile_index;

pub use config::{
    AggregatorConfig, DEFAULT_BOARD_LIMIT, DEFAULT_TILE_TIMEOUT, DEFAULT_TILE_ZOOM,
    DestinationOrder,
};
pub use error::{AggregateError, DestinationResolutionError};
pub use events::AggregatorEvent;
pub use provider::{TileProvider, TransportBackend, TransportProvider};
pub use slot::ConnectionSlot;

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 32;

/// Resolves station names into connections and keeps the current one.
pub struct Aggregator<P, T> {
    provider: P,
    tiles: T,
    config: AggregatorConfig,
    slot: ConnectionSlot,
    events: broadcast::Sender<AggregatorEvent>,
}

impl<P, T> Aggregator<P, T>
where
    P: TransportProvider + Sync,
    T: TileProvider + Sync,
{
    pub fn new(provider: P, tiles: T, config: AggregatorConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            provider,
            tiles,
            config,
            slot: ConnectionSlot::new(),
            events,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// The slot holding the current connection.
    pub fn slot(&self) -> &ConnectionSlot {
        &self.slot
    }

    /// Subscribe to board and publish notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<AggregatorEvent> {
        self.events.subscribe()
    }

    /// Resolve `query` into a connection and publish it as current.
    ///
    /// On success the connection is returned even if a newer resolution
    /// started meanwhile; in that case it is not published.
    pub async fn resolve_connection(
        &self,
        query: &StationQuery,
    ) -> Result<Arc<Connection>, AggregateError> {
        let generation = self.slot.begin();
        let connection = Arc::new(self.assemble(query, generation).await?);

        if self.slot.publish(connection.clone()).await {
            info!(
                station = %query,
                generation,
                stations = connection.len(),
                "connection published"
            );
            let _ = self.events.send(AggregatorEvent::ConnectionPublished {
                generation,
                station: query.to_string(),
                stations: connection.len(),
            });
        } else {
            debug!(
                station = %query,
                generation,
                latest = self.slot.latest_generation(),
                "discarding stale connection"
            );
        }

        Ok(connection)
    }

    async fn assemble(
        &self,
        query: &StationQuery,
        generation: u64,
    ) -> Result<Connection, AggregateError> {
        let name = query.as_str();

        let coordinates = match self.provider.lookup_coordinates(name).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => {
                warn!(station = %name, "station coordinates not found");
                return Err(AggregateError::StationNotFound {
                    station: name.to_string(),
                    source: None,
                });
            }
            Err(e) => {
                warn!(station = %name, error = %e, "station lookup failed");
                return Err(AggregateError::StationNotFound {
                    station: name.to_string(),
                    source: Some(e),
                });
            }
        };

        let departure = Station::departure(name, coordinates);
        let tile = tile_index(
            coordinates.latitude(),
            coordinates.longitude(),
            self.config.tile_zoom,
        );

        // Optional, and bounded by the tile timeout.
        let image = async {
            match timeout(self.config.tile_timeout, self.tiles.lookup_tile(tile)).await {
                Ok(Ok(url)) => Some(url),
                Ok(Err(e)) => {
                    debug!(station = %name, %tile, error = %e, "station image unavailable");
                    None
                }
                Err(_) => {
                    debug!(station = %name, %tile, "station image lookup timed out");
                    None
                }
            }
        };
        let destinations = async {
            let entries = self.fetch_board(name, generation).await?;
            Ok::<_, AggregateError>(self.resolve_destinations(&departure, &entries).await)
        };

        let (image_url, destinations) = tokio::join!(image, destinations);
        let destinations = destinations?;

        let departure = match image_url {
            Some(url) => departure.with_image_url(url),
            None => departure,
        };
        let mut connection = Connection::new(departure, generation);
        for station in destinations {
            connection.push_destination(station);
        }
        Ok(connection)
    }

    async fn fetch_board(
        &self,
        name: &str,
        generation: u64,
    ) -> Result<Vec<BoardEntry>, AggregateError> {
        let entries = match self
            .provider
            .lookup_departure_board(name, self.config.board_limit)
            .await
        {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => {
                warn!(station = %name, "no departure board data");
                return Err(AggregateError::NoScheduleData {
                    station: name.to_string(),
                    source: None,
                });
            }
            Err(e) => {
                warn!(station = %name, error = %e, "departure board lookup failed");
                return Err(AggregateError::NoScheduleData {
                    station: name.to_string(),
                    source: Some(e),
                });
            }
        };

        debug!(station = %name, entries = entries.len(), "departure board loaded");
        let _ = self.events.send(AggregatorEvent::BoardLoaded {
            generation,
            station: name.to_string(),
            entries: entries.len(),
        });

        Ok(entries)
    }

    /// Geocode every board entry concurrently and keep the ones that resolve.
    async fn resolve_destinations(
        &self,
        departure: &Station,
        entries: &[BoardEntry],
    ) -> Vec<Station> {
        let lookups = entries
            .iter()
            .map(|entry| self.resolve_destination(departure, entry));

        let settled: Vec<_> = match self.config.order {
            DestinationOrder::Board => join_all(lookups).await,
            DestinationOrder::Completion => {
                lookups.collect::<FuturesUnordered<_>>().collect().await
            }
        };

        settled
            .into_iter()
            .filter_map(|result| match result {
                Ok(station) => Some(station),
                Err(e) => {
                    warn!(destination = %e.destination, error = %e, "skipping destination");
                    None
                }
            })
            .collect()
    }

    async fn resolve_destination(
        &self,
        departure: &Station,
        entry: &BoardEntry,
    ) -> Result<Station, DestinationResolutionError> {
        match self.provider.lookup_coordinates(&entry.destination).await {
            Ok(Some(coordinates)) => Ok(Station::destination(
                entry.destination.clone(),
                coordinates,
                departure,
            )),
            Ok(None) => Err(DestinationResolutionError::new(
                &entry.destination,
                "coordinates not found",
            )),
            Err(e) => Err(DestinationResolutionError::new(
                &entry.destination,
                e.to_string(),
            )),
        }
    }
}
