//! Notifications emitted while resolving connections.

/// Events for downstream collaborators such as the audio player.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorEvent {
    /// The departure board arrived. Fired before destinations are resolved;
    /// this is the cue to start the next track.
    BoardLoaded {
        generation: u64,
        station: String,
        entries: usize,
    },

    /// A complete connection became current.
    ConnectionPublished {
        generation: u64,
        station: String,
        stations: usize,
    },
}
