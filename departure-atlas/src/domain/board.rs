//! Departure board entries.

/// One upcoming trip on a station's departure board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    /// Name of the trip's final destination.
    pub destination: String,
}

impl BoardEntry {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}
