//! The connection: a departure station and the destinations served from it.

use chrono::{DateTime, Utc};

use super::Station;

/// Ordered stations reachable from one departure.
///
/// Index 0 is always the departure station; destinations follow in the order
/// they were pushed. Destination names are not deduplicated: two board
/// entries for the same destination give two stations.
#[derive(Debug, Clone)]
pub struct Connection {
    stations: Vec<Station>,
    generation: u64,
    resolved_at: DateTime<Utc>,
}

impl Connection {
    /// Start a connection from its departure station.
    pub fn new(departure: Station, generation: u64) -> Self {
        Self {
            stations: vec![departure],
            generation,
            resolved_at: Utc::now(),
        }
    }

    /// Append a destination after the departure and any earlier destinations.
    pub fn push_destination(&mut self, station: Station) {
        self.stations.push(station);
    }

    /// The departure station.
    pub fn departure(&self) -> &Station {
        &self.stations[0]
    }

    /// All destinations, in insertion order.
    pub fn destinations(&self) -> &[Station] {
        &self.stations[1..]
    }

    /// Departure followed by destinations.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false: a connection holds at least its departure.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Generation of the resolution that produced this connection.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }

    /// The station furthest from the departure.
    ///
    /// Ties go to the earlier station, so a connection with no destinations
    /// (or only zero-distance ones) yields the departure.
    pub fn furthest_station(&self) -> &Station {
        let mut furthest = self.departure();
        for station in self.destinations() {
            if station.distance_from_departure_km() > furthest.distance_from_departure_km() {
                furthest = station;
            }
        }
        furthest
    }
}
