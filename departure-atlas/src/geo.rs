//! Spherical geometry: great-circle distance and slippy-map tile addressing.

use std::f64::consts::PI;
use std::fmt;

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (Haversine).
pub fn great_circle_distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal pairs just past 1.
    let h = h.min(1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Integer address of a map tile under the slippy-map convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    /// The `{zoom}/{x}/{y}` path used by tile servers.
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Convert a latitude/longitude in degrees to the tile containing it.
///
/// Both axes are clamped to `[0, 2^zoom - 1]`, so `lon = 180` and latitudes
/// past the Web-Mercator limit still land on the grid.
///
/// # Examples
///
/// ```
/// use departure_atlas::geo::tile_index;
///
/// let tile = tile_index(0.0, 0.0, 1);
/// assert_eq!((tile.x, tile.y), (1, 1));
/// ```
pub fn tile_index(lat: f64, lon: f64, zoom: u8) -> TileIndex {
    let n = 2f64.powi(i32::from(zoom));
    let lat_rad = lat.to_radians();

    let x = ((lon + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

    TileIndex {
        x: clamp_axis(x, n),
        y: clamp_axis(y, n),
        zoom,
    }
}

fn clamp_axis(v: f64, n: f64) -> u32 {
    // Only the south pole yields NaN: tan and sec cancel and ln goes negative.
    if v.is_nan() {
        return (n - 1.0) as u32;
    }
    v.clamp(0.0, n - 1.0) as u32
}
