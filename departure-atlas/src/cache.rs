//! Caching layer for geocoding lookups.
//!
//! Every destination on a departure board needs a geocoding request, and
//! the same destinations show up on board after board. Station coordinates
//! do not move, so lookups are cached for a long TTL. Departure boards are
//! never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::aggregator::TransportProvider;
use crate::domain::{BoardEntry, Coordinates};
use crate::transport::TransportError;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Transport provider with cached geocoding.
///
/// Both found and not-found answers are cached; transport errors are not.
#[derive(Clone)]
pub struct CachedProvider<P> {
    inner: P,
    coordinates: MokaCache<String, Option<Coordinates>>,
}

impl<P> CachedProvider<P> {
    /// Wrap a provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let coordinates = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, coordinates }
    }

    /// Access the underlying provider for operations that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: TransportProvider + Sync> TransportProvider for CachedProvider<P> {
    async fn lookup_coordinates(&self, name: &str) -> Result<Option<Coordinates>, TransportError> {
        if let Some(cached) = self.coordinates.get(name).await {
            trace!(station = %name, "coordinate cache hit");
            return Ok(cached);
        }

        let coordinates = self.inner.lookup_coordinates(name).await?;
        self.coordinates.insert(name.to_string(), coordinates).await;
        Ok(coordinates)
    }

    async fn lookup_departure_board(
        &self,
        station: &str,
        limit: usize,
    ) -> Result<Vec<BoardEntry>, TransportError> {
        self.inner.lookup_departure_board(station, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn mock() -> MockTransport {
        MockTransport::new()
            .with_location("Bern", Coordinates::new(46.948, 7.4474).unwrap())
            .with_board("Bern", &["Thun"])
            .with_failure("Olten")
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(86_400));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let inner = mock();
        let cached = CachedProvider::new(inner.clone(), &CacheConfig::default());

        let first = cached.lookup_coordinates("Bern").await.unwrap();
        let second = cached.lookup_coordinates("Bern").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(inner.request_count(), 1);
    }

    #[tokio::test]
    async fn not_found_is_cached() {
        let inner = mock();
        let cached = CachedProvider::new(inner.clone(), &CacheConfig::default());

        assert!(cached.lookup_coordinates("Atlantis").await.unwrap().is_none());
        assert!(cached.lookup_coordinates("Atlantis").await.unwrap().is_none());
        assert_eq!(inner.request_count(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let inner = mock();
        let cached = CachedProvider::new(inner.clone(), &CacheConfig::default());

        assert!(cached.lookup_coordinates("Olten").await.is_err());
        assert!(cached.lookup_coordinates("Olten").await.is_err());
        assert_eq!(inner.request_count(), 2);
    }

    #[tokio::test]
    async fn boards_pass_through() {
        let inner = mock();
        let cached = CachedProvider::new(inner.clone(), &CacheConfig::default());

        cached.lookup_departure_board("Bern", 20).await.unwrap();
        cached.lookup_departure_board("Bern", 20).await.unwrap();
        assert_eq!(inner.request_count(), 2);
    }
}
