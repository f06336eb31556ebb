//! Per-frame derivation of the shader-visible placement parameters.
//!
//! The terrain shader samples the height and color images by world-space XZ
//! position, but material parameters are not affected by the host's
//! hierarchical transform stack, so the mapping rects have to be pushed into
//! world space here every frame: the ambient transform can change each
//! frame even when the frame state does not (a terrain parented to a moving
//! object). Rect starts are transformed as *points*; rect extents as
//! *vectors*, which ignore translation, so a translating parent cannot
//! shift an extent twice.

use glam::{Affine3A, Vec3, Vec4};
use relief_render::Material;

use crate::frame::CoordinateFrame;

/// Height image rect: world XZ start, world XZ extent.
pub const UNIFORM_HEIGHT_RECT: &str = "height_rect";
/// Color image rect: world XZ start, world XZ extent.
pub const UNIFORM_COLOR_RECT: &str = "color_rect";
/// Clip cutoff: world center (xyz) and *squared* radius (w). Squared so the
/// shader can test `distance² < radius²` without a square root.
pub const UNIFORM_CLIP_SPHERE: &str = "clip_sphere";
/// World-space vertical meters mapped by the height image's top value.
pub const UNIFORM_HEIGHT_SCALE: &str = "height_scale";
/// Height image binding.
pub const UNIFORM_HEIGHT_TEX: &str = "height_map";
/// Color image binding.
pub const UNIFORM_COLOR_TEX: &str = "color_map";

/// Re-derive all four parameter bundles from the frame under the ambient
/// transform. Runs unconditionally once per update.
pub fn sync_material(material: &mut Material, frame: &CoordinateFrame, ambient: &Affine3A) {
    let position = frame.position();

    let height = frame.heightmap_rect();
    let start = ambient.transform_point3(position + Vec3::new(height.start.x, 0.0, height.start.y));
    let size = ambient.transform_vector3(Vec3::new(height.size.x, 0.0, height.size.y));
    material.set_vector(
        UNIFORM_HEIGHT_RECT,
        Vec4::new(start.x, start.z, size.x, size.z),
    );

    let color = frame.colormap_rect();
    let start = ambient.transform_point3(position + Vec3::new(color.start.x, 0.0, color.start.y));
    let size = ambient.transform_vector3(Vec3::new(color.size.x, 0.0, color.size.y));
    material.set_vector(
        UNIFORM_COLOR_RECT,
        Vec4::new(start.x, start.z, size.x, size.z),
    );

    // Radius and vertical scale ride through one vector transform so
    // non-uniform ambient scaling affects both consistently.
    let scaled = ambient.transform_vector3(Vec3::new(frame.clip_radius(), frame.height_scale(), 0.0));
    let clip_center = ambient.transform_point3(position + frame.clip_center());
    material.set_vector(
        UNIFORM_CLIP_SPHERE,
        Vec4::new(clip_center.x, clip_center.y, clip_center.z, scaled.x * scaled.x),
    );
    material.set_scalar(UNIFORM_HEIGHT_SCALE, scaled.y);
}
