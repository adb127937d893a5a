//! Station name input.

use std::fmt;

/// A non-blank station name as typed by the user.
///
/// Surrounding whitespace is trimmed. Blank input does not produce a query,
/// which is how callers turn an empty search box into a no-op.
///
/// # Examples
///
/// ```
/// use departure_atlas::domain::StationQuery;
///
/// let q = StationQuery::parse("  Bern ").unwrap();
/// assert_eq!(q.as_str(), "Bern");
///
/// assert!(StationQuery::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationQuery(String);

impl StationQuery {
    /// Parse user input, returning `None` for empty or whitespace-only text.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
