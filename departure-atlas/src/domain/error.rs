//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from transport/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude is not a finite value in [-90, 90]
    #[error("invalid latitude {0}: must be within [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude is not a finite value in [-180, 180]
    #[error("invalid longitude {0}: must be within [-180, 180]")]
    InvalidLongitude(f64),

    /// A required text field was blank
    #[error("{0} must not be blank")]
    BlankField(&'static str),
}
