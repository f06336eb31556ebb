//! The chunk grid and its snap-without-flicker recentering.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Fraction of a chunk edge the focus must drift from the anchor before the
/// grid snaps. Strictly less than [`RECENTER_STEP`]: the open gap between
/// the two is the hysteresis band that keeps boundary jitter from causing
/// repeated snapping.
pub const RECENTER_TRIGGER: f32 = 0.4;

/// Fraction of a chunk edge the anchor moves per snap. After a snap the
/// offset lands within ±0.1 of a chunk edge from zero, far from the next
/// trigger boundary.
pub const RECENTER_STEP: f32 = 0.5;

/// Which point the grid keeps itself centered on.
///
/// The two references feed the identical hysteresis step; they only change
/// what the grid drifts toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecenterReference {
    /// Track the negated terrain position: the grid stays centered over the
    /// local origin, where the clip circle lives, while the map is dragged
    /// underneath it.
    #[default]
    TerrainOrigin,
    /// Track an externally supplied focus point (viewer head or hand), so
    /// the covered area follows the viewer across the map.
    FocusPoint,
}

/// One tile of terrain geometry.
///
/// `center_offset` is fixed at grid construction and never mutated; only the
/// shared anchor moves. The composed transform and the selected resolution
/// level are recomputed by the owning terrain.
#[derive(Clone, Copy, Debug)]
pub struct Chunk {
    pub(crate) center_offset: Vec3,
    pub(crate) transform: Affine3A,
    pub(crate) lod: u8,
}

impl Chunk {
    /// Fixed offset from the grid's recenter anchor.
    pub fn center_offset(&self) -> Vec3 {
        self.center_offset
    }

    /// Chunk-local to world transform, as of the last refresh.
    pub fn transform(&self) -> Affine3A {
        self.transform
    }

    /// Selected resolution level.
    pub fn lod(&self) -> u8 {
        self.lod
    }
}

/// An NxN array of chunks at fixed offsets around a shared, grid-snapped
/// anchor.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    chunks: Vec<Chunk>,
    anchor: Vec3,
    chunk_size: f32,
    dimension: usize,
    reference: RecenterReference,
}

impl ChunkGrid {
    /// Build a grid of `grid_dimension * grid_dimension` chunks with
    /// `chunk_size` metric edges.
    ///
    /// An even `grid_dimension` is rounded up to the next odd count so that
    /// exactly one chunk sits centered on the anchor; zero rounds up to one.
    pub fn new(chunk_size: f32, grid_dimension: usize, reference: RecenterReference) -> Self {
        let dimension = if grid_dimension % 2 == 0 {
            grid_dimension + 1
        } else {
            grid_dimension
        };
        let half = (dimension / 2) as i32;

        let mut chunks = Vec::with_capacity(dimension * dimension);
        for y in 0..dimension {
            for x in 0..dimension {
                let offset =
                    Vec3::new((x as i32 - half) as f32, 0.0, (y as i32 - half) as f32) * chunk_size;
                chunks.push(Chunk {
                    center_offset: offset,
                    transform: Affine3A::from_translation(offset),
                    lod: 0,
                });
            }
        }

        Self {
            chunks,
            anchor: Vec3::ZERO,
            chunk_size,
            dimension,
            reference,
        }
    }

    /// Effective chunks-per-side (always odd).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Metric chunk edge length.
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    /// The grid-snapped point the grid is currently centered on.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// All chunks, row-major.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub(crate) fn chunks_mut(&mut self) -> &mut [Chunk] {
        &mut self.chunks
    }

    /// Resolve the configured recenter reference and snap the anchor toward
    /// it if the focus has drifted past the trigger band. Returns whether
    /// any axis shifted; the caller refreshes transforms when it did.
    pub fn update(&mut self, position: Vec3, focus: Vec3) -> bool {
        let reference = match self.reference {
            RecenterReference::TerrainOrigin => -position,
            RecenterReference::FocusPoint => focus - position,
        };
        self.recenter(reference)
    }

    /// Snap the anchor one half-chunk step toward `reference` on each
    /// horizontal axis whose offset exceeds the trigger band.
    ///
    /// The axes are independent, at most one step moves per axis per call,
    /// and an offset inside the band leaves the anchor untouched, so a
    /// steadily moving focus produces exactly one shift per half chunk of
    /// travel and a focus jittering around a boundary produces none.
    pub fn recenter(&mut self, reference: Vec3) -> bool {
        let trigger = RECENTER_TRIGGER * self.chunk_size;
        let step = RECENTER_STEP * self.chunk_size;
        let offset = reference - self.anchor;
        let mut shifted = false;

        if offset.x > trigger {
            self.anchor.x += step;
            shifted = true;
        } else if offset.x < -trigger {
            self.anchor.x -= step;
            shifted = true;
        }
        if offset.z > trigger {
            self.anchor.z += step;
            shifted = true;
        } else if offset.z < -trigger {
            self.anchor.z -= step;
            shifted = true;
        }

        shifted
    }

    /// Recompose every chunk's world transform from its fixed offset, the
    /// current anchor, and the terrain position.
    pub fn refresh_transforms(&mut self, position: Vec3) {
        for chunk in &mut self.chunks {
            chunk.transform =
                Affine3A::from_translation(chunk.center_offset + self.anchor + position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(chunk_size: f32, dimension: usize) -> ChunkGrid {
        ChunkGrid::new(chunk_size, dimension, RecenterReference::TerrainOrigin)
    }

    #[test]
    fn test_even_dimension_rounds_up_to_odd() {
        let g = grid(1.0, 4);
        assert_eq!(g.dimension(), 5);
        assert_eq!(g.chunks().len(), 25);
    }

    #[test]
    fn test_odd_dimension_is_kept() {
        assert_eq!(grid(1.0, 3).dimension(), 3);
        assert_eq!(grid(1.0, 1).dimension(), 1);
    }

    #[test]
    fn test_exactly_one_chunk_is_centered() {
        let g = grid(0.6, 4);
        let centered = g
            .chunks()
            .iter()
            .filter(|c| c.center_offset() == Vec3::ZERO)
            .count();
        assert_eq!(centered, 1);
    }

    #[test]
    fn test_offsets_are_symmetric() {
        let g = grid(2.0, 3);
        let min = g.chunks().iter().map(|c| c.center_offset().x).fold(f32::MAX, f32::min);
        let max = g.chunks().iter().map(|c| c.center_offset().x).fold(f32::MIN, f32::max);
        assert_eq!(min, -2.0);
        assert_eq!(max, 2.0);
    }

    #[test]
    fn test_linear_sweep_shifts_once_per_half_chunk() {
        // Driving the reference from 0 to 10 in 0.01 steps must produce
        // exactly 20 shifts: one per 0.5 units, no chatter, none missed.
        let mut g = grid(1.0, 3);
        let mut shifts = 0;
        for i in 0..=1000 {
            let x = i as f32 * 0.01;
            if g.recenter(Vec3::new(x, 0.0, 0.0)) {
                shifts += 1;
            }
        }
        assert_eq!(shifts, 20);
        assert_eq!(g.anchor().x, 10.0);
    }

    #[test]
    fn test_boundary_jitter_causes_no_extra_shifts() {
        let mut g = grid(1.0, 3);
        assert!(g.recenter(Vec3::new(0.41, 0.0, 0.0)), "first crossing snaps");

        // Oscillating across the old trigger boundary stays inside the
        // hysteresis band around the new rest point.
        for _ in 0..50 {
            assert!(!g.recenter(Vec3::new(0.39, 0.0, 0.0)));
            assert!(!g.recenter(Vec3::new(0.41, 0.0, 0.0)));
        }
        assert_eq!(g.anchor().x, 0.5);
    }

    #[test]
    fn test_post_shift_offset_is_near_zero() {
        let mut g = grid(1.0, 3);
        g.recenter(Vec3::new(0.41, 0.0, 0.0));
        // New offset = 0.41 - 0.5 = -0.09, well inside the ±0.4 band.
        assert!((0.41 - g.anchor().x).abs() <= 0.1 + 1e-6);
    }

    #[test]
    fn test_negative_direction_shifts_mirror() {
        let mut g = grid(1.0, 3);
        assert!(g.recenter(Vec3::new(-0.41, 0.0, 0.0)));
        assert_eq!(g.anchor().x, -0.5);
    }

    #[test]
    fn test_axes_shift_independently() {
        let mut g = grid(1.0, 3);
        assert!(g.recenter(Vec3::new(0.45, 0.0, -0.45)));
        assert_eq!(g.anchor(), Vec3::new(0.5, 0.0, -0.5));

        // y is ignored entirely.
        assert!(!g.recenter(Vec3::new(0.5, 99.0, -0.5)));
        assert_eq!(g.anchor().y, 0.0);
    }

    #[test]
    fn test_terrain_origin_reference_negates_position() {
        let mut g = grid(1.0, 3);
        // Dragging the terrain +x means the anchor must move -x.
        assert!(g.update(Vec3::new(0.41, 0.0, 0.0), Vec3::ZERO));
        assert_eq!(g.anchor().x, -0.5);
    }

    #[test]
    fn test_focus_point_reference_follows_focus() {
        let mut g = ChunkGrid::new(1.0, 3, RecenterReference::FocusPoint);
        assert!(g.update(Vec3::ZERO, Vec3::new(0.41, 0.0, 0.0)));
        assert_eq!(g.anchor().x, 0.5);
    }

    #[test]
    fn test_refresh_composes_offset_anchor_and_position() {
        let mut g = grid(1.0, 3);
        g.recenter(Vec3::new(0.41, 0.0, 0.0));
        let position = Vec3::new(0.0, 0.0, 2.0);
        g.refresh_transforms(position);

        for chunk in g.chunks() {
            let expected = chunk.center_offset() + g.anchor() + position;
            assert_eq!(Vec3::from(chunk.transform().translation), expected);
        }
    }
}
