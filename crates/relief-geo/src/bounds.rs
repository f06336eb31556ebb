//! Degree-space bounding boxes.

use glam::DVec2;

use crate::EARTH_CIRCUMFERENCE;

/// A geographic extent in degrees: south/north latitude, west/east longitude.
///
/// Input-only: nothing in this workspace mutates a box after construction.
/// `south <= north` is expected; the west/east interval may wrap the
/// antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Southern latitude edge, degrees.
    pub south: f64,
    /// Western longitude edge, degrees.
    pub west: f64,
    /// Northern latitude edge, degrees.
    pub north: f64,
    /// Eastern longitude edge, degrees.
    pub east: f64,
}

impl BoundingBox {
    /// Create a box from edges in south, west, north, east order.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Degree-space centroid as (x = longitude, y = latitude).
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }
}

/// Build the degree box spanning `radius_m` meters in every direction around
/// a center point. The longitude radius is widened by `1/cos(latitude)` so
/// the box stays square in meters as longitude lines converge toward the
/// poles.
pub fn lat_lon_bounds(latitude: f64, longitude: f64, radius_m: f64) -> BoundingBox {
    let radius_lat = (radius_m * 360.0) / EARTH_CIRCUMFERENCE;
    let radius_lon = (radius_m * 360.0) / (EARTH_CIRCUMFERENCE * latitude.to_radians().cos());

    BoundingBox::new(
        latitude - radius_lat,
        longitude - radius_lon,
        latitude + radius_lat,
        longitude + radius_lon,
    )
}
