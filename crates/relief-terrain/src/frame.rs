//! The terrain's logical placement, owned exclusively by its terrain instance.

use glam::{Vec2, Vec3};

/// Metric rectangle a loaded map image covers in terrain-local space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapRect {
    /// Top-left corner (x = east, y = north), meters.
    pub start: Vec2,
    /// Extent, meters.
    pub size: Vec2,
}

/// Placement state for one terrain: where it sits, where the clip circle
/// cuts it off, and which metric rects the loaded height/color images cover.
///
/// Setters assign values only; nothing is recomputed until the next per-frame
/// sync pass, so several setters in one frame cost one recomputation. Rects
/// are overwritten wholesale on each data load, never merged. Degenerate
/// dimensions (zero or negative) are accepted and propagate as degenerate
/// sampling rects; validating them is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateFrame {
    position: Vec3,
    clip_center: Vec3,
    clip_radius: f32,
    height_scale: f32,
    heightmap_rect: MapRect,
    colormap_rect: MapRect,
}

impl CoordinateFrame {
    /// A frame at the origin with zero clip radius and no loaded rects.
    pub fn new() -> Self {
        Self::default()
    }

    /// The terrain's logical placement, meters.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Clip circle center, relative to [`position`](Self::position).
    pub fn clip_center(&self) -> Vec3 {
        self.clip_center
    }

    /// Clip circle radius, meters.
    pub fn clip_radius(&self) -> f32 {
        self.clip_radius
    }

    /// Vertical meters mapped by the height image's top value.
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Rect covered by the current height image.
    pub fn heightmap_rect(&self) -> MapRect {
        self.heightmap_rect
    }

    /// Rect covered by the current color image.
    pub fn colormap_rect(&self) -> MapRect {
        self.colormap_rect
    }

    /// Move the terrain.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Place the clip circle.
    pub fn set_clip(&mut self, center: Vec3, radius: f32) {
        self.clip_center = center;
        self.clip_radius = radius;
    }

    /// Override the vertical scale.
    pub fn set_height_scale(&mut self, height_scale: f32) {
        self.height_scale = height_scale;
    }

    /// Record the region a newly loaded height image covers.
    ///
    /// `dimensions` is the metric footprint (x/z) plus the elevation mapped
    /// by the image's top value (y), which becomes the new height scale;
    /// `center` is the region center relative to the terrain.
    pub fn set_height_rect(&mut self, dimensions: Vec3, center: Vec2) {
        let footprint = Vec2::new(dimensions.x, dimensions.z);
        self.heightmap_rect = MapRect {
            start: center - footprint / 2.0,
            size: footprint,
        };
        self.height_scale = dimensions.y;
    }

    /// Record the region a newly loaded color image covers.
    pub fn set_color_rect(&mut self, dimensions: Vec2, center: Vec2) {
        self.colormap_rect = MapRect {
            start: center - dimensions / 2.0,
            size: dimensions,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_zeroed() {
        let frame = CoordinateFrame::new();
        assert_eq!(frame.position(), Vec3::ZERO);
        assert_eq!(frame.clip_radius(), 0.0);
        assert_eq!(frame.heightmap_rect(), MapRect::default());
        assert_eq!(frame.colormap_rect(), MapRect::default());
    }

    #[test]
    fn test_height_rect_starts_half_a_size_before_center() {
        let mut frame = CoordinateFrame::new();
        frame.set_height_rect(Vec3::new(4.0, 8848.0, 2.0), Vec2::new(10.0, 20.0));

        let rect = frame.heightmap_rect();
        assert_eq!(rect.start, Vec2::new(8.0, 19.0));
        assert_eq!(rect.size, Vec2::new(4.0, 2.0));
        assert_eq!(frame.height_scale(), 8848.0);
    }

    #[test]
    fn test_data_loads_overwrite_wholesale() {
        let mut frame = CoordinateFrame::new();
        frame.set_color_rect(Vec2::new(4.0, 2.0), Vec2::ZERO);
        frame.set_color_rect(Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0));

        let rect = frame.colormap_rect();
        assert_eq!(rect.start, Vec2::new(4.5, 4.5));
        assert_eq!(rect.size, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_height_scale_override_survives_until_next_load() {
        let mut frame = CoordinateFrame::new();
        frame.set_height_rect(Vec3::new(1.0, 100.0, 1.0), Vec2::ZERO);
        frame.set_height_scale(250.0);
        assert_eq!(frame.height_scale(), 250.0);

        frame.set_height_rect(Vec3::new(1.0, 100.0, 1.0), Vec2::ZERO);
        assert_eq!(frame.height_scale(), 100.0);
    }

    #[test]
    fn test_degenerate_dimensions_are_accepted() {
        let mut frame = CoordinateFrame::new();
        frame.set_height_rect(Vec3::ZERO, Vec2::ZERO);
        assert_eq!(frame.heightmap_rect().size, Vec2::ZERO);

        frame.set_color_rect(Vec2::new(-2.0, 0.0), Vec2::ZERO);
        assert_eq!(frame.colormap_rect().size, Vec2::new(-2.0, 0.0));
        assert_eq!(frame.colormap_rect().start, Vec2::new(1.0, 0.0));
    }
}
