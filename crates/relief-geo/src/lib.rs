//! Latitude/longitude math: converting degree-based geographic extents into
//! metric distances and into local regions relative to a reference query.
//!
//! Map services hand back imagery tagged with degree bounding boxes, which are
//! not directly drawable in a metric 3D scene. These functions convert degree
//! extents to and from 2D grids of meters on a flat local tangent plane.
//! The approximation carries a single cosine factor for longitude convergence
//! and no curvature correction, so it is only valid for regions small relative
//! to Earth's radius.

mod bounds;
mod local;

pub use bounds::{BoundingBox, lat_lon_bounds};
pub use local::{WorldRegion, bounds_size, bounds_to_local, dist_latitude, dist_longitude};

/// Earth's circumference along the equator, in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_040.0;

/// Highest elevation any height region can represent, in meters.
/// Mount Everest is 8,848 m tall.
pub const MAX_ELEVATION: f32 = 8_848.0;
