//! Journey-planning provider client.
//!
//! This module provides an HTTP client for the public transport API's
//! `locations` (geocoding) and `stationboard` (departure board) endpoints.
//!
//! Key characteristics of the provider:
//! - Coordinates come back as `{x, y}` with `x` the latitude
//! - Unknown coordinates are sent as `null` rather than omitted
//! - Only the first location candidate is meaningful for geocoding

mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, TransportClient, TransportConfig};
pub use error::TransportError;
pub use mock::MockTransport;
pub use types::{BoardJourney, Coordinate, Location, LocationsResponse, StationboardResponse};
