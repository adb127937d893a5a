//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::aggregator::{Aggregator, TransportBackend};
use crate::tasks::{FileStore, TaskList};
use crate::tiles::TileClient;

/// The aggregator the server runs.
pub type AppAggregator = Aggregator<TransportBackend, TileClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Connection aggregator and current-connection slot
    pub aggregator: Arc<AppAggregator>,

    /// Persisted task list
    pub tasks: Arc<Mutex<TaskList<FileStore>>>,
}

impl AppState {
    pub fn new(aggregator: AppAggregator, tasks: TaskList<FileStore>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }
}
