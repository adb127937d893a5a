//! Aggregator configuration.

use std::str::FromStr;
use std::time::Duration;

/// Departures requested per board.
pub const DEFAULT_BOARD_LIMIT: usize = 20;

/// Zoom level of the departure station's map tile.
pub const DEFAULT_TILE_ZOOM: u8 = 18;

/// Longest wait for the departure tile before resolving without an image.
pub const DEFAULT_TILE_TIMEOUT: Duration = Duration::from_secs(2);

/// Order of destinations in a resolved connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationOrder {
    /// Departure-board order, regardless of lookup timing.
    #[default]
    Board,
    /// The order lookups complete in. Not deterministic across runs.
    Completion,
}

impl FromStr for DestinationOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "board" => Ok(DestinationOrder::Board),
            "completion" => Ok(DestinationOrder::Completion),
            other => Err(format!(
                "unknown destination order {other:?} (expected \"board\" or \"completion\")"
            )),
        }
    }
}

/// Configuration parameters for connection resolution.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Maximum number of departures to fetch.
    pub board_limit: usize,

    /// Zoom level for the departure tile.
    pub tile_zoom: u8,

    /// Budget for the tile lookup.
    pub tile_timeout: Duration,

    /// How destinations are ordered.
    pub order: DestinationOrder,
}

impl AggregatorConfig {
    pub fn with_order(mut self, order: DestinationOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_tile_timeout(mut self, tile_timeout: Duration) -> Self {
        self.tile_timeout = tile_timeout;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            board_limit: DEFAULT_BOARD_LIMIT,
            tile_zoom: DEFAULT_TILE_ZOOM,
            tile_timeout: DEFAULT_TILE_TIMEOUT,
            order: DestinationOrder::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AggregatorConfig::default();
        assert_eq!(config.board_limit, 20);
        assert_eq!(config.tile_zoom, 18);
        assert_eq!(config.tile_timeout, Duration::from_secs(2));
        assert_eq!(config.order, DestinationOrder::Board);
    }

    #[test]
    fn parse_order() {
        assert_eq!("board".parse::<DestinationOrder>(), Ok(DestinationOrder::Board));
        assert_eq!(
            " Completion ".parse::<DestinationOrder>(),
            Ok(DestinationOrder::Completion)
        );
        assert!("random".parse::<DestinationOrder>().is_err());
    }
}
