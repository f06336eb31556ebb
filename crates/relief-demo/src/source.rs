//! Synthetic map data source.
//!
//! Stands in for the real imagery/elevation service: answers a degree-box
//! query with a color image and an elevation grid, the same shapes the real
//! service returns. Imagery comes back with *tile-snapped* bounds that are
//! slightly larger than the query, which is exactly the query-vs-given
//! mismatch the terrain's offset mapping exists to absorb; elevation grids
//! come back with the queried bounds verbatim.

use image::{ImageBuffer, Luma, Rgba, RgbaImage};
use noise::{NoiseFn, Simplex};
use relief_geo::{BoundingBox, MAX_ELEVATION};

/// 16-bit grayscale heightmap image.
pub type HeightImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Highest elevation the synthetic terrain produces, meters.
const PEAK_M: f64 = 3000.0;

/// Degree grid imagery tiles snap to.
const TILE_GRID_DEG: f64 = 1.0 / 64.0;

/// Color imagery resolution per side.
const COLOR_RESOLUTION: u32 = 256;

/// Elevation grid values per side (the real service caps a request at 1024
/// samples, hence 32x32).
const HEIGHT_RESOLUTION: u32 = 32;

/// A returned color image plus the bounds it actually covers.
pub struct ColorResult {
    pub image: RgbaImage,
    pub given: BoundingBox,
}

/// A returned elevation grid plus the bounds it actually covers.
pub struct HeightResult {
    pub image: HeightImage,
    pub given: BoundingBox,
}

/// Deterministic fractal terrain sampled in degree space.
pub struct MapSource {
    noise: Simplex,
}

impl MapSource {
    /// Create a source; the same seed always produces the same planet.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
        }
    }

    /// Elevation in meters at a lat/lon, in `[0, PEAK_M]`.
    pub fn elevation_m(&self, latitude: f64, longitude: f64) -> f64 {
        // Multi-octave fBm; each octave doubles in frequency and halves in
        // amplitude.
        let octaves = 5;
        let lacunarity = 2.0;
        let persistence = 0.5;

        let mut total = 0.0;
        let mut max_amplitude = 0.0;
        let mut frequency = 24.0;
        let mut amplitude = 1.0;
        for _ in 0..octaves {
            total += self.noise.get([longitude * frequency, latitude * frequency]) * amplitude;
            max_amplitude += amplitude;
            frequency *= lacunarity;
            amplitude *= persistence;
        }

        let normalized = (total / max_amplitude + 1.0) / 2.0;
        normalized.clamp(0.0, 1.0) * PEAK_M
    }

    /// Fetch aerial-style imagery for a query box.
    ///
    /// The returned bounds are the query snapped outward to the tile grid,
    /// so they always contain the query but rarely equal it.
    pub fn fetch_color(&self, query: &BoundingBox) -> ColorResult {
        let given = snap_outward(query, TILE_GRID_DEG);
        let image = RgbaImage::from_fn(COLOR_RESOLUTION, COLOR_RESOLUTION, |x, y| {
            let (latitude, longitude) = sample_point(&given, x, y, COLOR_RESOLUTION);
            hypsometric_tint(self.elevation_m(latitude, longitude) / PEAK_M)
        });
        ColorResult { image, given }
    }

    /// Fetch an elevation grid for a query box.
    ///
    /// Elevation requests work exactly within the bounds provided, so the
    /// given box is the query verbatim. Values are normalized against the
    /// maximum representable elevation, matching the height image contract.
    pub fn fetch_height(&self, query: &BoundingBox) -> HeightResult {
        let image = HeightImage::from_fn(HEIGHT_RESOLUTION, HEIGHT_RESOLUTION, |x, y| {
            let (latitude, longitude) = sample_point(query, x, y, HEIGHT_RESOLUTION);
            let normalized = self.elevation_m(latitude, longitude) / MAX_ELEVATION as f64;
            Luma([(normalized.clamp(0.0, 1.0) * u16::MAX as f64) as u16])
        });
        HeightResult {
            image,
            given: *query,
        }
    }
}

/// Lat/lon of a pixel center. Row zero is the box's north edge.
fn sample_point(bounds: &BoundingBox, x: u32, y: u32, resolution: u32) -> (f64, f64) {
    let u = (x as f64 + 0.5) / resolution as f64;
    let v = (y as f64 + 0.5) / resolution as f64;
    let latitude = bounds.north - v * (bounds.north - bounds.south);
    let longitude = bounds.west + u * (bounds.east - bounds.west);
    (latitude, longitude)
}

/// Snap a degree box outward to the tile grid.
fn snap_outward(bounds: &BoundingBox, grid: f64) -> BoundingBox {
    BoundingBox::new(
        (bounds.south / grid).floor() * grid,
        (bounds.west / grid).floor() * grid,
        (bounds.north / grid).ceil() * grid,
        (bounds.east / grid).ceil() * grid,
    )
}

/// Map a normalized elevation to a terrain tint: sea-green lowlands through
/// tan and rock-gray up to snow.
fn hypsometric_tint(t: f64) -> Rgba<u8> {
    const STOPS: [(f64, [f64; 3]); 4] = [
        (0.0, [0.22, 0.43, 0.28]),
        (0.4, [0.62, 0.55, 0.35]),
        (0.75, [0.48, 0.46, 0.44]),
        (1.0, [0.95, 0.95, 0.97]),
    ];

    let t = t.clamp(0.0, 1.0);
    let mut color = STOPS[STOPS.len() - 1].1;
    for window in STOPS.windows(2) {
        let (start, start_color) = window[0];
        let (end, end_color) = window[1];
        if t <= end {
            let blend = ((t - start) / (end - start)).clamp(0.0, 1.0);
            color = [
                start_color[0] + (end_color[0] - start_color[0]) * blend,
                start_color[1] + (end_color[1] - start_color[1]) * blend,
                start_color[2] + (end_color[2] - start_color[2]) * blend,
            ];
            break;
        }
    }

    Rgba([
        (color[0] * 255.0) as u8,
        (color[1] * 255.0) as u8,
        (color[2] * 255.0) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_geo::lat_lon_bounds;

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = MapSource::new(7);
        let b = MapSource::new(7);
        assert_eq!(a.elevation_m(22.0, -159.5), b.elevation_m(22.0, -159.5));

        let query = lat_lon_bounds(22.0, -159.5, 20_000.0);
        assert_eq!(
            a.fetch_height(&query).image.as_raw(),
            b.fetch_height(&query).image.as_raw()
        );
    }

    #[test]
    fn test_elevation_stays_in_range() {
        let source = MapSource::new(0);
        for i in 0..100 {
            let latitude = -60.0 + i as f64 * 1.3;
            let longitude = -170.0 + i as f64 * 3.1;
            let e = source.elevation_m(latitude, longitude);
            assert!((0.0..=PEAK_M).contains(&e), "elevation {e} out of range");
        }
    }

    #[test]
    fn test_height_bounds_match_query_exactly() {
        let source = MapSource::new(1);
        let query = lat_lon_bounds(36.3, -112.75, 10_000.0);
        let result = source.fetch_height(&query);
        assert_eq!(result.given, query);
        assert_eq!(result.image.width(), HEIGHT_RESOLUTION);
    }

    #[test]
    fn test_color_bounds_contain_query() {
        let source = MapSource::new(1);
        let query = lat_lon_bounds(27.98, 86.92, 10_000.0);
        let result = source.fetch_color(&query);
        assert!(result.given.south <= query.south);
        assert!(result.given.west <= query.west);
        assert!(result.given.north >= query.north);
        assert!(result.given.east >= query.east);
    }

    #[test]
    fn test_tint_endpoints() {
        assert_eq!(hypsometric_tint(0.0), Rgba([56, 109, 71, 255]));
        let snow = hypsometric_tint(1.0);
        assert!(snow.0[0] > 230 && snow.0[1] > 230 && snow.0[2] > 230);
    }
}
