//! Departure atlas server.
//!
//! Geocodes a departure station, reads its departure board, places every
//! destination on the map and publishes the result as the current
//! connection.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod playlist;
pub mod tasks;
pub mod tiles;
pub mod transport;
pub mod web;
