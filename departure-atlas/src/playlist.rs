//! Soundtrack rotation cued by departure boards.
//!
//! Every loaded board starts the next track, wrapping around at the end of
//! the list. Playback itself belongs to the client; this only tracks which
//! track is due.

use tokio::sync::broadcast::{Receiver, error::RecvError};
use tracing::{info, warn};

use crate::aggregator::AggregatorEvent;

/// Tracks shipped with the client.
pub const DEFAULT_TRACK_COUNT: usize = 9;

/// Ordered tracks and the index of the next one to play.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<String>,
    next: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<String>) -> Self {
        Self { tracks, next: 0 }
    }

    /// `assets/sound/01.mp3` through `assets/sound/NN.mp3`.
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|i| format!("assets/sound/{i:02}.mp3"))
                .collect(),
        )
    }

    /// The track to play now. Moves on to the following one.
    pub fn advance(&mut self) -> Option<&str> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = self.next;
        self.next = (self.next + 1) % self.tracks.len();
        Some(&self.tracks[index])
    }
}

/// Advance `playlist` on every board until the event channel closes.
pub async fn follow_boards(
    mut events: Receiver<AggregatorEvent>,
    mut playlist: Playlist,
) -> Playlist {
    loop {
        match events.recv().await {
            Ok(AggregatorEvent::BoardLoaded {
                generation,
                station,
                ..
            }) => match playlist.advance() {
                Some(track) => info!(generation, %station, track, "playing next track"),
                None => warn!(%station, "board loaded but playlist is empty"),
            },
            Ok(AggregatorEvent::ConnectionPublished { .. }) => {}
            Err(RecvError::Lagged(n)) => warn!(skipped = n, "playlist listener lagged"),
            Err(RecvError::Closed) => return playlist,
        }
    }
}
