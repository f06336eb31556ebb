//! Renderer-boundary value types: opaque asset handles, the per-LOD mesh
//! array, the named shader-parameter store, and draw calls.
//!
//! The actual rendering device is an external collaborator. Meshes and
//! textures are created elsewhere and cross this boundary only as opaque
//! ids; shader state crosses it as named parameters on a [`Material`]; and
//! geometry submission crosses it as one [`DrawCall`] per chunk per frame.

mod draw;
mod handle;
mod material;

pub use draw::DrawCall;
pub use handle::{MeshHandle, MeshLevels, TexHandle};
pub use material::{Material, ShaderParam};
