//! Aggregator error types.

use crate::transport::TransportError;

/// Errors that abort a connection resolution. Nothing is published.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// The departure station could not be geocoded
    #[error("station not found: {station}")]
    StationNotFound {
        station: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The departure board was empty or unavailable
    #[error("no schedule data for {station}")]
    NoScheduleData {
        station: String,
        #[source]
        source: Option<TransportError>,
    },
}

/// One destination could not be placed on the map.
///
/// Recovered locally: the destination is logged and skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("could not resolve destination {destination}: {reason}")]
pub struct DestinationResolutionError {
    pub destination: String,
    pub reason: String,
}

impl DestinationResolutionError {
    pub fn new(destination: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            reason: reason.into(),
        }
    }
}
