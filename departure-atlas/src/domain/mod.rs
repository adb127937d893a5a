//! Domain types for the departure atlas.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod board;
mod connection;
mod error;
mod query;
mod station;

pub use board::BoardEntry;
pub use connection::Connection;
pub use error::DomainError;
pub use query::StationQuery;
pub use station::{Coordinates, Station};
