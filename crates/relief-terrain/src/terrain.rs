//! The terrain instance: owns the frame, grid, selector, and material, and
//! turns one update per rendered frame into per-chunk draw calls.

use glam::{Affine3A, Vec2, Vec3};
use relief_render::{DrawCall, Material, MeshLevels, TexHandle};
use tracing::{debug, info};

use crate::frame::CoordinateFrame;
use crate::grid::{ChunkGrid, RecenterReference};
use crate::lod::{LodPolicy, LodSelector};
use crate::sync::{self, UNIFORM_COLOR_TEX, UNIFORM_HEIGHT_TEX};

/// Construction parameters for a [`Terrain`].
///
/// Geometry density per chunk is deliberately absent: meshes are pre-built by
/// an external collaborator and arrive as a [`MeshLevels`] array.
#[derive(Clone, Copy, Debug)]
pub struct TerrainParams {
    /// Metric edge length of one chunk.
    pub chunk_size: f32,
    /// Chunks per side; an even count is rounded up to the next odd.
    pub grid_dimension: usize,
    /// Initial clip circle radius, meters.
    pub clip_radius: f32,
    /// What the grid keeps itself centered on.
    pub recenter: RecenterReference,
    /// How per-chunk resolution levels are chosen.
    pub lod_policy: LodPolicy,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            chunk_size: 0.6,
            grid_dimension: 3,
            clip_radius: 0.3,
            recenter: RecenterReference::default(),
            lod_policy: LodPolicy::default(),
        }
    }
}

/// Externally supplied per-frame inputs.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Focus point (camera, hand, or held object) in the same metric space
    /// as the terrain position. Drives focus-point recentering and
    /// head-relative LOD.
    pub focus: Vec3,
    /// The active ambient transform for this frame. The host's hierarchy
    /// can move every frame, so it is threaded in explicitly rather than
    /// read from any global.
    pub ambient: Affine3A,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            ambient: Affine3A::IDENTITY,
        }
    }
}

/// A scrolling terrain surface.
///
/// Exclusively owns its [`CoordinateFrame`] and [`ChunkGrid`]; the data
/// source, input, and render collaborators all reach them through this one
/// handle. Setters only assign state; derived shader parameters are
/// recomputed at the single per-frame sync point inside [`update`](Self::update).
#[derive(Clone, Debug)]
pub struct Terrain {
    frame: CoordinateFrame,
    grid: ChunkGrid,
    selector: LodSelector,
    levels: MeshLevels,
    material: Material,
    transforms_dirty: bool,
}

impl Terrain {
    /// Build a terrain over pre-built mesh levels and an empty material.
    pub fn new(params: &TerrainParams, levels: MeshLevels, material: Material) -> Self {
        let mut frame = CoordinateFrame::new();
        frame.set_clip(Vec3::ZERO, params.clip_radius);

        let mut grid = ChunkGrid::new(params.chunk_size, params.grid_dimension, params.recenter);
        let selector = LodSelector::new(params.lod_policy, levels.max_lod());
        select_lods(&mut grid, &selector, Vec3::ZERO);

        Self {
            frame,
            grid,
            selector,
            levels,
            material,
            transforms_dirty: false,
        }
    }

    /// The current placement state.
    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    /// The chunk grid (diagnostics and tests).
    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    /// The material carrying the synced shader parameters.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Move the terrain. Chunk transforms refresh on the next update.
    pub fn set_position(&mut self, position: Vec3) {
        self.frame.set_position(position);
        self.transforms_dirty = true;
    }

    /// Place the clip circle (center relative to the terrain position).
    pub fn set_clip(&mut self, center: Vec3, radius: f32) {
        self.frame.set_clip(center, radius);
    }

    /// Override the vertical scale without reloading height data.
    pub fn set_height_scale(&mut self, height_scale: f32) {
        self.frame.set_height_scale(height_scale);
    }

    /// Re-place the current height image without replacing it (zoom/scale
    /// changes re-use the loaded image over a rescaled region).
    ///
    /// `dimensions` is the region footprint (x/z) plus the elevation mapped
    /// by the image's top value (y); `center` is the region center relative
    /// to the terrain.
    pub fn set_height_dimensions(&mut self, dimensions: Vec3, center: Vec2) {
        self.frame.set_height_rect(dimensions, center);
    }

    /// Re-place the current color image without replacing it.
    pub fn set_color_dimensions(&mut self, dimensions: Vec2, center: Vec2) {
        self.frame.set_color_rect(dimensions, center);
    }

    /// Replace the height image and the metric region it covers.
    ///
    /// The image binds immediately; the rect parameters reach the shader at
    /// the next update.
    pub fn set_height_data(&mut self, tex: TexHandle, dimensions: Vec3, center: Vec2) {
        self.set_height_dimensions(dimensions, center);
        self.material.set_texture(UNIFORM_HEIGHT_TEX, tex);
        info!(?dimensions, ?center, "height data replaced");
    }

    /// Replace the color image and the metric region it covers.
    pub fn set_color_data(&mut self, tex: TexHandle, dimensions: Vec2, center: Vec2) {
        self.set_color_dimensions(dimensions, center);
        self.material.set_texture(UNIFORM_COLOR_TEX, tex);
        info!(?dimensions, ?center, "color data replaced");
    }

    /// Run one frame: recenter the grid, refresh transforms and LODs where
    /// needed, sync the shader parameters, and emit one draw call per chunk.
    pub fn update(&mut self, input: &FrameInput, out: &mut Vec<DrawCall>) {
        let shifted = self.grid.update(self.frame.position(), input.focus);
        if shifted {
            debug!(anchor = ?self.grid.anchor(), "chunk grid recentered");
        }

        if shifted || self.transforms_dirty {
            self.grid.refresh_transforms(self.frame.position());
            self.transforms_dirty = false;
        }

        if shifted || self.selector.per_frame() {
            let focus_from_anchor = input.focus - self.frame.position() - self.grid.anchor();
            select_lods(&mut self.grid, &self.selector, focus_from_anchor);
        }

        sync::sync_material(&mut self.material, &self.frame, &input.ambient);

        for chunk in self.grid.chunks() {
            out.push(DrawCall {
                mesh: self.levels.handle(chunk.lod),
                lod: chunk.lod,
                transform: chunk.transform,
            });
        }
    }
}

fn select_lods(grid: &mut ChunkGrid, selector: &LodSelector, focus_from_anchor: Vec3) {
    let chunk_size = grid.chunk_size();
    for chunk in grid.chunks_mut() {
        chunk.lod = selector.select(chunk.center_offset, focus_from_anchor, chunk_size);
    }
}
