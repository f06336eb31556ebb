//! Per-chunk draw submission.

use glam::Affine3A;

use crate::handle::MeshHandle;

/// One chunk's draw submission for the current frame.
///
/// The renderer binds the terrain's material alongside; `lod` is carried so
/// diagnostics can histogram resolution selection without resolving handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    /// The pre-built mesh for this chunk's selected resolution level.
    pub mesh: MeshHandle,
    /// The resolution level `mesh` was selected from.
    pub lod: u8,
    /// Chunk-local to world transform.
    pub transform: Affine3A,
}
