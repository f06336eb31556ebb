//! Headless stand-in for the rendering device.
//!
//! Owns the mesh and texture registries the real renderer would own, hands
//! out the opaque handles the terrain consumes, and "draws" by logging. The
//! terrain core never learns the difference.

use glam::Vec3;
use image::RgbaImage;
use relief_render::{DrawCall, Material, MeshHandle, MeshLevels, TexHandle};
use tracing::{debug, trace};

use crate::source::HeightImage;

/// A registered plane mesh: `detail` vertices per edge over `edge_length`
/// meters.
#[derive(Clone, Copy, Debug)]
struct MeshDesc {
    edge_length: f32,
    detail: u32,
}

/// A registered texture's dimensions.
#[derive(Clone, Copy, Debug)]
struct TexDesc {
    width: u32,
    height: u32,
}

/// Registry-backed headless renderer.
pub struct HeadlessRenderer {
    meshes: Vec<MeshDesc>,
    textures: Vec<TexDesc>,
    white_tex: TexHandle,
    black_tex: TexHandle,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        let mut renderer = Self {
            meshes: Vec::new(),
            textures: Vec::new(),
            white_tex: TexHandle(0),
            black_tex: TexHandle(0),
        };
        // 1x1 placeholders bound while a location's real data is in flight.
        renderer.white_tex = renderer.register_texture(1, 1);
        renderer.black_tex = renderer.register_texture(1, 1);
        renderer
    }

    /// Placeholder color texture (plain white).
    pub fn white_tex(&self) -> TexHandle {
        self.white_tex
    }

    /// Placeholder height texture (all zero elevation).
    pub fn black_tex(&self) -> TexHandle {
        self.black_tex
    }

    /// Register one plane mesh.
    pub fn create_plane_mesh(&mut self, edge_length: f32, detail: u32) -> MeshHandle {
        self.meshes.push(MeshDesc {
            edge_length,
            detail,
        });
        MeshHandle(self.meshes.len() as u32 - 1)
    }

    /// Pre-build the chunk mesh array: `levels` planes halving in density
    /// per step, densest first.
    pub fn build_mesh_levels(&mut self, edge_length: f32, base_detail: u32, levels: u32) -> MeshLevels {
        let handles = (0..levels)
            .map(|lod| self.create_plane_mesh(edge_length, (base_detail >> lod).max(2)))
            .collect();
        MeshLevels::new(handles)
    }

    /// Upload a color image.
    pub fn upload_color(&mut self, image: &RgbaImage) -> TexHandle {
        self.register_texture(image.width(), image.height())
    }

    /// Upload a 16-bit height image.
    pub fn upload_height(&mut self, image: &HeightImage) -> TexHandle {
        self.register_texture(image.width(), image.height())
    }

    /// "Draw" a frame: one call per chunk with the terrain's material bound.
    pub fn submit(&self, material: &Material, calls: &[DrawCall], trace_calls: bool) {
        debug!(
            chunks = calls.len(),
            params = material.len(),
            "frame submitted"
        );
        if trace_calls {
            for call in calls {
                let mesh = self.meshes[call.mesh.0 as usize];
                trace!(
                    mesh = call.mesh.0,
                    lod = call.lod,
                    detail = mesh.detail,
                    edge = mesh.edge_length,
                    position = ?Vec3::from(call.transform.translation),
                    "draw"
                );
            }
        }
    }

    /// Dimensions a texture was registered with.
    pub fn texture_size(&self, tex: TexHandle) -> (u32, u32) {
        let desc = self.textures[tex.0 as usize];
        (desc.width, desc.height)
    }

    fn register_texture(&mut self, width: u32, height: u32) -> TexHandle {
        self.textures.push(TexDesc { width, height });
        TexHandle(self.textures.len() as u32 - 1)
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}
