//! Web layer: JSON endpoints for connections, station search and tasks.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppAggregator, AppState};
