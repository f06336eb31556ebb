//! Mapping degree extents onto the local metric tangent plane.
//!
//! All terrain placement is expressed relative to the center of the *query*
//! region, the box originally requested from the data source. The box the
//! source actually returns can differ slightly (tile snapping, server-side
//! rounding), and [`bounds_to_local`] turns that difference into a metric
//! offset so returned imagery still lands in the right spot.

use glam::{Vec2, Vec3};

use crate::bounds::BoundingBox;
use crate::{EARTH_CIRCUMFERENCE, MAX_ELEVATION};

/// Metric distance between two latitudes, in meters. Symmetric up to sign.
pub fn dist_latitude(a: f64, b: f64) -> f64 {
    (EARTH_CIRCUMFERENCE * (a - b)) / 360.0
}

/// Metric distance between two longitudes, in meters.
///
/// `ref_latitude` compensates for longitude lines converging toward the
/// poles; it must be the latitude of the region's *center*, not of either
/// endpoint, to keep the flat-plane approximation locally consistent.
pub fn dist_longitude(a: f64, b: f64, ref_latitude: f64) -> f64 {
    ((a - b) * EARTH_CIRCUMFERENCE * ref_latitude.to_radians().cos()) / 360.0
}

/// Metric footprint of a degree box: x = east-west meters measured at the
/// box's mid-latitude, y = north-south meters.
pub fn bounds_size(bounds: &BoundingBox) -> Vec2 {
    Vec2::new(
        dist_longitude(bounds.east, bounds.west, (bounds.north + bounds.south) / 2.0) as f32,
        dist_latitude(bounds.north, bounds.south) as f32,
    )
}

/// A degree box projected into local metric space, relative to a query box.
///
/// Produced only by [`bounds_to_local`]; immutable once computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldRegion {
    /// Metric extent: x/z are the horizontal footprint of the given box,
    /// y is the fixed maximum representable elevation. All scaled.
    pub size: Vec3,
    /// Metric displacement of the given box's center from the query box's
    /// center (x = east, y = north). Scaled.
    pub offset: Vec2,
}

/// Project `given` into the local metric space anchored on `query`'s center.
///
/// `bounds_to_local(b, b, s)` yields a zero offset and
/// `size.xz == bounds_size(b) * s`, the anchor invariant the terrain
/// placement depends on.
pub fn bounds_to_local(query: &BoundingBox, given: &BoundingBox, scale: f32) -> WorldRegion {
    let query_center = query.center();
    let given_center = given.center();

    let offset = Vec2::new(
        dist_longitude(given_center.x, query_center.x, query_center.y) as f32,
        dist_latitude(given_center.y, query_center.y) as f32,
    ) * scale;

    let horizontal = bounds_size(given) * scale;

    WorldRegion {
        size: Vec3::new(horizontal.x, MAX_ELEVATION * scale, horizontal.y),
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn kauai() -> BoundingBox {
        BoundingBox::new(20.0, -160.0, 24.0, -159.0)
    }

    #[test]
    fn test_dist_latitude_of_equal_points_is_zero() {
        for lat in [-89.0, -45.5, 0.0, 0.001, 36.3, 90.0] {
            assert_eq!(dist_latitude(lat, lat), 0.0);
        }
    }

    #[test]
    fn test_dist_longitude_of_equal_points_is_zero() {
        for lon in [-180.0, -72.54, 0.0, 86.92, 179.9] {
            assert_eq!(dist_longitude(lon, lon, 45.0), 0.0);
            assert_eq!(dist_longitude(lon, lon, -13.16), 0.0);
        }
    }

    #[test]
    fn test_dist_latitude_full_circle() {
        // 360 degrees of latitude is one full circumference.
        let d = dist_latitude(360.0, 0.0);
        assert!((d - EARTH_CIRCUMFERENCE).abs() < 1e-6);
    }

    #[test]
    fn test_dist_longitude_shrinks_with_latitude() {
        let at_equator = dist_longitude(1.0, 0.0, 0.0);
        let at_60 = dist_longitude(1.0, 0.0, 60.0);
        // cos(60 deg) = 0.5
        assert!((at_60 / at_equator - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_size_is_positive() {
        let size = bounds_size(&kauai());
        assert!(size.x > 0.0);
        assert!(size.y > 0.0);
    }

    #[test]
    fn test_bounds_to_local_anchor_invariant() {
        // Querying and receiving the same box must place it dead-center.
        let b = kauai();
        let scale = 0.0001;
        let region = bounds_to_local(&b, &b, scale);

        assert!(region.offset.x.abs() < EPSILON);
        assert!(region.offset.y.abs() < EPSILON);

        let expected = bounds_size(&b) * scale;
        assert!((region.size.x - expected.x).abs() < EPSILON);
        assert!((region.size.z - expected.y).abs() < EPSILON);
        assert!((region.size.y - crate::MAX_ELEVATION * scale).abs() < EPSILON);
    }

    #[test]
    fn test_bounds_to_local_scales_linearly() {
        let b = kauai();
        let s = 0.0001;
        let single = bounds_to_local(&b, &b, s);
        let double = bounds_to_local(&b, &b, 2.0 * s);

        assert!(single.size.x > 0.0);
        assert!(single.size.z > 0.0);
        assert!((double.size.x - 2.0 * single.size.x).abs() < EPSILON);
        assert!((double.size.z - 2.0 * single.size.z).abs() < EPSILON);
        assert!((double.size.y - 2.0 * single.size.y).abs() < EPSILON);
    }

    #[test]
    fn test_bounds_to_local_offset_direction() {
        // A returned box north-east of the query should offset +x (east)
        // and +y (north).
        let query = kauai();
        let given = BoundingBox::new(
            query.south + 0.1,
            query.west + 0.1,
            query.north + 0.1,
            query.east + 0.1,
        );
        let region = bounds_to_local(&query, &given, 1.0);
        assert!(region.offset.x > 0.0, "east shift should be positive x");
        assert!(region.offset.y > 0.0, "north shift should be positive y");
    }

    #[test]
    fn test_degenerate_box_propagates_without_panic() {
        // Zero-area boxes are accepted and produce a degenerate region.
        let b = BoundingBox::new(10.0, 20.0, 10.0, 20.0);
        let region = bounds_to_local(&b, &b, 1.0);
        assert_eq!(region.size.x, 0.0);
        assert_eq!(region.size.z, 0.0);
        assert_eq!(region.offset, Vec2::ZERO);
    }
}
