//! Environment-driven application configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::aggregator::{AggregatorConfig, DestinationOrder};
use crate::cache::CacheConfig;
use crate::tiles::TileConfig;
use crate::transport::TransportConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TASKS_PATH: &str = "tasks.json";

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    pub transport: TransportConfig,
    pub tiles: TileConfig,
    pub cache: CacheConfig,
    pub aggregator: AggregatorConfig,
    /// Key-value file holding the task list
    pub tasks_path: PathBuf,
    /// Fixture file that replaces the live transport API
    pub mock_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// Unset variables use defaults; unparseable ones are logged and also
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_addr: SocketAddr = ([127, 0, 0, 1], 3000).into();
        let bind_addr = match var("BIND_ADDR") {
            Some(raw) => raw.parse::<SocketAddr>().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "invalid BIND_ADDR, using {DEFAULT_BIND_ADDR}");
                default_addr
            }),
            None => default_addr,
        };

        let mut transport = TransportConfig::new();
        if let Some(url) = var("TRANSPORT_BASE_URL") {
            transport = transport.with_base_url(url);
        }

        let mock_file = var("TRANSPORT_MOCK_FILE").map(PathBuf::from);

        let mut tiles = TileConfig::new();
        if let Some(url) = var("TILE_BASE_URL") {
            tiles = tiles.with_base_url(url);
        }
        if mock_file.is_some() {
            tiles = tiles.with_verify(false);
        }

        let order = match var("DESTINATION_ORDER") {
            Some(raw) => raw.parse::<DestinationOrder>().unwrap_or_else(|e| {
                warn!(error = %e, "invalid DESTINATION_ORDER, using board order");
                DestinationOrder::Board
            }),
            None => DestinationOrder::Board,
        };

        Self {
            bind_addr,
            transport,
            tiles,
            cache: CacheConfig::default(),
            aggregator: AggregatorConfig::default().with_order(order),
            tasks_path: var("TASKS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_PATH)),
            mock_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.transport.base_url, crate::transport::DEFAULT_BASE_URL);
        assert_eq!(config.tiles.base_url, crate::tiles::DEFAULT_TILE_BASE_URL);
        assert!(config.tiles.verify);
        assert_eq!(config.aggregator.order, DestinationOrder::Board);
        assert_eq!(config.tasks_path, PathBuf::from("tasks.json"));
        assert!(config.mock_file.is_none());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("TRANSPORT_BASE_URL", "http://localhost:9000/v1"),
            ("TILE_BASE_URL", "http://tiles.local"),
            ("DESTINATION_ORDER", "completion"),
            ("TASKS_PATH", "/tmp/store.json"),
        ]);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.transport.base_url, "http://localhost:9000/v1");
        assert_eq!(config.tiles.base_url, "http://tiles.local");
        assert_eq!(config.aggregator.order, DestinationOrder::Completion);
        assert_eq!(config.tasks_path, PathBuf::from("/tmp/store.json"));
    }

    #[test]
    fn mock_file_disables_tile_checks() {
        let config = config(&[("TRANSPORT_MOCK_FILE", "fixtures/switzerland.json")]);
        assert_eq!(
            config.mock_file,
            Some(PathBuf::from("fixtures/switzerland.json"))
        );
        assert!(!config.tiles.verify);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[("BIND_ADDR", "nowhere"), ("DESTINATION_ORDER", "random")]);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.aggregator.order, DestinationOrder::Board);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("TASKS_PATH", "  ")]);
        assert_eq!(config.tasks_path, PathBuf::from("tasks.json"));
    }
}
