//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Connection, Station};
use crate::tasks::Task;

/// Request to resolve a connection.
#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    /// Departure station name
    #[serde(default)]
    pub station: String,
}

/// A station in a connection.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Great-circle distance from the departure station, rounded to metres
    pub distance_km: f64,

    /// Map tile image (departure station only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A resolved connection.
#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub generation: u64,

    /// RFC 3339 resolution time
    pub resolved_at: String,

    /// Departure station
    pub departure: StationResult,

    /// Destinations in connection order
    pub destinations: Vec<StationResult>,
}

/// Station autocomplete request.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    #[serde(default)]
    pub q: String,
}

/// Station autocomplete response.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<String>,
}

/// Request to add a task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub title: String,
    pub description: String,

    /// `YYYY-MM-DD`
    pub due_date: String,
}

/// A task with its list position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub status: String,
}

/// All tasks in list order.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Conversion implementations

impl StationResult {
    /// Convert a domain station.
    pub fn from_station(station: &Station) -> Self {
        let coordinates = station.coordinates();
        Self {
            name: station.name().to_string(),
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            distance_km: round_km(station.distance_from_departure_km()),
            image_url: station.image_url().map(str::to_string),
        }
    }
}

impl ConnectionResponse {
    /// Convert a domain connection.
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            generation: connection.generation(),
            resolved_at: connection.resolved_at().to_rfc3339(),
            departure: StationResult::from_station(connection.departure()),
            destinations: connection
                .destinations()
                .iter()
                .map(StationResult::from_station)
                .collect(),
        }
    }
}

impl TaskResult {
    pub fn from_task(index: usize, task: &Task) -> Self {
        Self {
            index,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            status: task.status.to_string(),
        }
    }
}

impl TasksResponse {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks
                .iter()
                .enumerate()
                .map(|(i, t)| TaskResult::from_task(i, t))
                .collect(),
        }
    }
}

fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}
