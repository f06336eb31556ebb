//! Per-chunk resolution level selection.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a chunk's resolution level is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LodPolicy {
    /// Every chunk at full resolution.
    Constant,
    /// Resolution falls off radially from the grid anchor, one level per
    /// chunk of distance, regardless of where the viewer looks from.
    #[default]
    CenterDistance,
    /// Resolution falls off around the focus point instead of the anchor,
    /// so detail follows the viewer even away from the grid center.
    HeadRelative,
}

/// Chooses an index into the pre-built mesh level array. Never generates
/// geometry.
#[derive(Clone, Copy, Debug)]
pub struct LodSelector {
    policy: LodPolicy,
    max_lod: u8,
}

impl LodSelector {
    /// Create a selector producing levels in `[0, max_lod)`.
    ///
    /// # Panics
    ///
    /// Panics if `max_lod` is zero.
    pub fn new(policy: LodPolicy, max_lod: u8) -> Self {
        assert!(max_lod >= 1, "must have at least one resolution level");
        Self { policy, max_lod }
    }

    /// The active policy.
    pub fn policy(&self) -> LodPolicy {
        self.policy
    }

    /// Exclusive upper bound on returned levels.
    pub fn max_lod(&self) -> u8 {
        self.max_lod
    }

    /// Whether selection depends on the focus point and therefore must be
    /// re-run every frame. The other policies only change on anchor shifts.
    pub fn per_frame(&self) -> bool {
        matches!(self.policy, LodPolicy::HeadRelative)
    }

    /// Select the level for a chunk at `center_offset` from the anchor,
    /// with the focus point at `focus_from_anchor` (also anchor-relative).
    ///
    /// Always in `[0, max_lod)`, including at distance zero and at
    /// distances far beyond `chunk_size * max_lod`.
    pub fn select(&self, center_offset: Vec3, focus_from_anchor: Vec3, chunk_size: f32) -> u8 {
        let distance = match self.policy {
            LodPolicy::Constant => return 0,
            LodPolicy::CenterDistance => center_offset.length(),
            LodPolicy::HeadRelative => (center_offset - focus_from_anchor).length(),
        };

        // `as` saturates, so an infinite ratio from a degenerate chunk size
        // still clamps to the coarsest level instead of crashing.
        let level = (distance / chunk_size).floor() as u32;
        level.min(self.max_lod as u32 - 1) as u8
    }
}
