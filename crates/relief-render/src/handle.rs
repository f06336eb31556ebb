//! Opaque asset handles and the fixed per-LOD mesh array.

/// Opaque id for a mesh owned by the external renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque id for a texture owned by the external renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TexHandle(pub u32);

/// Pre-built chunk meshes, one per resolution level.
///
/// Index 0 is the densest mesh; each following level halves in density.
/// The levels are fixed assets supplied by the external mesh-generation
/// collaborator; nothing here ever builds geometry, only selects an index.
#[derive(Clone, Debug)]
pub struct MeshLevels {
    levels: Vec<MeshHandle>,
}

impl MeshLevels {
    /// Wrap a pre-built level array.
    ///
    /// # Panics
    ///
    /// Panics if `levels` is empty or holds more than `u8::MAX` entries.
    pub fn new(levels: Vec<MeshHandle>) -> Self {
        assert!(!levels.is_empty(), "must have at least one mesh level");
        assert!(
            levels.len() <= u8::MAX as usize,
            "mesh level count must fit in a u8"
        );
        Self { levels }
    }

    /// Number of levels; valid LOD indices are `0..max_lod`.
    pub fn max_lod(&self) -> u8 {
        self.levels.len() as u8
    }

    /// The mesh for a resolution level.
    ///
    /// # Panics
    ///
    /// Panics if `lod >= max_lod()`.
    pub fn handle(&self, lod: u8) -> MeshHandle {
        self.levels[lod as usize]
    }

    /// All levels, densest first.
    pub fn levels(&self) -> &[MeshHandle] {
        &self.levels
    }
}
