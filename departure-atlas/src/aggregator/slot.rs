//! The current connection, guarded by a generation counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::Connection;

#[derive(Default)]
struct SlotState {
    published: u64,
    current: Option<Arc<Connection>>,
}

/// Holder of the one current connection.
///
/// Every resolution takes a generation from [`ConnectionSlot::begin`]. A
/// publish is dropped once a newer generation has published, so a slow
/// resolution cannot overwrite a newer connection. A newer resolution that is
/// still running, or was abandoned, does not block an older one.
#[derive(Clone, Default)]
pub struct ConnectionSlot {
    started: Arc<AtomicU64>,
    state: Arc<RwLock<SlotState>>,
}

impl ConnectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next generation. Generations start at 1.
    pub fn begin(&self) -> u64 {
        self.started.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The newest generation handed out so far.
    pub fn latest_generation(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    /// Publish `connection` unless a newer generation has already published.
    ///
    /// Returns whether it became current.
    pub async fn publish(&self, connection: Arc<Connection>) -> bool {
        let generation = connection.generation();
        let mut state = self.state.write().await;

        if generation <= state.published {
            return false;
        }

        state.published = generation;
        state.current = Some(connection);
        true
    }

    /// The current connection, if any has been published.
    pub async fn current(&self) -> Option<Arc<Connection>> {
        self.state.read().await.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Station};

    fn connection(name: &str, generation: u64) -> Arc<Connection> {
        let station = Station::departure(name, Coordinates::new(46.948, 7.4474).unwrap());
        Arc::new(Connection::new(station, generation))
    }

    #[tokio::test]
    async fn starts_empty() {
        let slot = ConnectionSlot::new();
        assert!(slot.current().await.is_none());
        assert_eq!(slot.latest_generation(), 0);
    }

    #[tokio::test]
    async fn generations_increase() {
        let slot = ConnectionSlot::new();
        assert_eq!(slot.begin(), 1);
        assert_eq!(slot.begin(), 2);
        assert_eq!(slot.latest_generation(), 2);
    }

    #[tokio::test]
    async fn newest_publishes() {
        let slot = ConnectionSlot::new();
        let generation = slot.begin();
        assert!(slot.publish(connection("Bern", generation)).await);
        assert_eq!(slot.current().await.unwrap().departure().name(), "Bern");
    }

    #[tokio::test]
    async fn newer_replaces_older() {
        let slot = ConnectionSlot::new();
        let first = slot.begin();
        assert!(slot.publish(connection("Bern", first)).await);

        let second = slot.begin();
        assert!(slot.publish(connection("Thun", second)).await);
        assert_eq!(slot.current().await.unwrap().departure().name(), "Thun");
    }

    #[tokio::test]
    async fn stale_publish_discarded() {
        let slot = ConnectionSlot::new();
        let old = slot.begin();
        let new = slot.begin();

        assert!(slot.publish(connection("Thun", new)).await);
        assert!(!slot.publish(connection("Bern", old)).await);

        let current = slot.current().await.unwrap();
        assert_eq!(current.departure().name(), "Thun");
        assert_eq!(current.generation(), new);
    }

    #[tokio::test]
    async fn unfinished_newer_generation_does_not_block() {
        let slot = ConnectionSlot::new();
        let old = slot.begin();
        let _abandoned = slot.begin();

        assert!(slot.publish(connection("Bern", old)).await);
        assert_eq!(slot.current().await.unwrap().generation(), old);
    }

    #[tokio::test]
    async fn same_generation_publishes_once() {
        let slot = ConnectionSlot::new();
        let generation = slot.begin();

        assert!(slot.publish(connection("Bern", generation)).await);
        assert!(!slot.publish(connection("Thun", generation)).await);
        assert_eq!(slot.current().await.unwrap().departure().name(), "Bern");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let slot = ConnectionSlot::new();
        let other = slot.clone();
        let generation = other.begin();
        assert!(other.publish(connection("Bern", generation)).await);
        assert!(slot.current().await.is_some());
    }
}
