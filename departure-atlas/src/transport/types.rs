//! Transport API response DTOs.
//!
//! These types map directly to the provider's JSON responses. They use
//! `Option` liberally because the provider sends `null` for coordinates and
//! labels it does not know.

use serde::Deserialize;

use crate::domain::{BoardEntry, Coordinates};

/// Response from `/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub stations: Vec<Location>,
}

/// A location candidate (station, address or point of interest).
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: Option<String>,
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
}

/// Provider coordinate. `x` is the latitude and `y` the longitude.
#[derive(Debug, Clone, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Location {
    /// Validated coordinates, if the provider gave a usable pair.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let coordinate = self.coordinate.as_ref()?;
        Coordinates::new(coordinate.x?, coordinate.y?).ok()
    }
}

impl LocationsResponse {
    /// Coordinates of the first candidate. Later candidates are ignored.
    pub fn first_coordinates(&self) -> Option<Coordinates> {
        self.stations.first()?.coordinates()
    }

    /// Names of all candidates, in provider order.
    pub fn names(&self) -> Vec<String> {
        self.stations
            .iter()
            .filter_map(|s| s.name.clone())
            .collect()
    }
}

/// Response from `/stationboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationboardResponse {
    pub station: Option<Location>,
    pub stationboard: Option<Vec<BoardJourney>>,
}

/// A departing trip on the board.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardJourney {
    pub name: Option<String>,
    pub category: Option<String>,
    pub number: Option<String>,
    pub operator: Option<String>,
    pub to: Option<String>,
}

impl StationboardResponse {
    /// Board entries with a destination. Entries without one are dropped.
    pub fn entries(&self) -> Vec<BoardEntry> {
        self.stationboard
            .iter()
            .flatten()
            .filter_map(|journey| {
                let to = journey.to.as_deref()?.trim();
                if to.is_empty() {
                    return None;
                }
                Some(BoardEntry::new(to))
            })
            .collect()
    }
}
