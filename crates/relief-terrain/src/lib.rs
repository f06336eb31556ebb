//! Scrolling terrain core: chunk paging, per-chunk LOD selection, and the
//! per-frame sync of shader-visible placement parameters.
//!
//! A [`Terrain`] maintains a grid of geometry chunks centered on a moving
//! focus point. The grid re-centers itself in discrete half-chunk steps with
//! hysteresis so boundary jitter never causes repeated snapping; each chunk
//! picks a resolution level from a fixed array of pre-built meshes; and every
//! frame the loaded height/color map rects, the circular clip cutoff, and the
//! vertical scale are re-derived into named material parameters under an
//! explicitly threaded ambient transform.
//!
//! Everything here is single-threaded and frame-stepped: the host calls
//! [`Terrain::update`] exactly once per rendered frame, and the asynchronous
//! map data source delivers results through the `set_*_data` setters on the
//! same thread that drives the update.

mod frame;
mod grid;
mod lod;
mod sync;
mod terrain;

pub use frame::{CoordinateFrame, MapRect};
pub use grid::{Chunk, ChunkGrid, RECENTER_STEP, RECENTER_TRIGGER, RecenterReference};
pub use lod::{LodPolicy, LodSelector};
pub use sync::{
    UNIFORM_CLIP_SPHERE, UNIFORM_COLOR_RECT, UNIFORM_COLOR_TEX, UNIFORM_HEIGHT_RECT,
    UNIFORM_HEIGHT_SCALE, UNIFORM_HEIGHT_TEX, sync_material,
};
pub use terrain::{FrameInput, Terrain, TerrainParams};
