//! Station and coordinate types.

use std::fmt;

use serde::Serialize;

use crate::geo::great_circle_distance_km;

use super::DomainError;

/// A validated latitude/longitude pair in degrees.
///
/// Both components are finite and within their geographic range. This type
/// guarantees that any `Coordinates` value is valid by construction.
///
/// # Examples
///
/// ```
/// use departure_atlas::domain::Coordinates;
///
/// let zurich = Coordinates::new(47.3779, 8.5403).unwrap();
/// assert_eq!(zurich.latitude(), 47.3779);
///
/// assert!(Coordinates::new(90.5, 0.0).is_err());
/// assert!(Coordinates::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// A station placed on the map relative to a departure point.
///
/// Stations can only be built through [`Station::departure`] or
/// [`Station::destination`]; the distance is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    coordinates: Coordinates,
    distance_from_departure_km: f64,
    image_url: Option<String>,
}

impl Station {
    /// The departure station of a connection. Its distance is always zero.
    pub fn departure(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
            distance_from_departure_km: 0.0,
            image_url: None,
        }
    }

    /// A destination station, with its great-circle distance from `departure`.
    pub fn destination(
        name: impl Into<String>,
        coordinates: Coordinates,
        departure: &Station,
    ) -> Self {
        let distance = great_circle_distance_km(departure.coordinates, coordinates);
        Self {
            name: name.into(),
            coordinates,
            distance_from_departure_km: distance,
            image_url: None,
        }
    }

    /// Attach the map-tile image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_from_departure_km(&self) -> f64 {
        self.distance_from_departure_km
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Great-circle distance to another station in kilometres.
    pub fn distance_to(&self, other: &Station) -> f64 {
        great_circle_distance_km(self.coordinates, other.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn accepts_range_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Coordinates::new(-90.1, 0.0),
            Err(DomainError::InvalidLatitude(-90.1))
        );
        assert_eq!(
            Coordinates::new(0.0, 180.1),
            Err(DomainError::InvalidLongitude(180.1))
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinates::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn departure_has_zero_distance() {
        let station = Station::departure("Zürich HB", coords(47.3779, 8.5403));
        assert_eq!(station.distance_from_departure_km(), 0.0);
        assert_eq!(station.image_url(), None);
    }

    #[test]
    fn destination_distance_measured_from_departure() {
        let zurich = Station::departure("Zürich HB", coords(47.3779, 8.5403));
        let bern = Station::destination("Bern", coords(46.9480, 7.4474), &zurich);

        assert!((bern.distance_from_departure_km() - 95.0).abs() < 2.0);
        assert_eq!(bern.distance_from_departure_km(), zurich.distance_to(&bern));
    }

    #[test]
    fn image_url_attaches() {
        let station = Station::departure("Bern", coords(46.9480, 7.4474))
            .with_image_url("https://a.tile.openstreetmap.org/18/136499/92107.png");
        assert_eq!(
            station.image_url(),
            Some("https://a.tile.openstreetmap.org/18/136499/92107.png")
        );
    }

    #[test]
    fn display_coordinates() {
        assert_eq!(coords(46.948, 7.4474).to_string(), "(46.9480, 7.4474)");
    }
}
