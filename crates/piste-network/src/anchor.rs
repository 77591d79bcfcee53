//! Spatially indexed points of interest.
//!
//! Every structure contributes one or more anchors to the network's R-tree:
//! lift stations, trail starts and ends, lodges, and points sampled along
//! each trail so that crossings with other trails can be detected from any
//! position on the mountain.

use rstar::{PointDistance, RTreeObject, AABB};

use piste_core::{LiftId, LodgeId, TrailId, Vec3};

/// What sits at an indexed point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    LiftBottom(LiftId),
    LiftTop(LiftId),
    TrailStart(TrailId),
    TrailEnd(TrailId),
    /// A sampled centre-line point `distance` metres along `trail`.
    TrailPoint { trail: TrailId, distance: f32 },
    Lodge(LodgeId),
}

impl Anchor {
    /// The trail this anchor belongs to, if any.
    pub fn trail(self) -> Option<TrailId> {
        match self {
            Anchor::TrailStart(t) | Anchor::TrailEnd(t) => Some(t),
            Anchor::TrailPoint { trail, .. } => Some(trail),
            _ => None,
        }
    }

    /// The lift this anchor belongs to, if any.
    pub fn lift(self) -> Option<LiftId> {
        match self {
            Anchor::LiftBottom(l) | Anchor::LiftTop(l) => Some(l),
            _ => None,
        }
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D point with its anchor.
#[derive(Clone, Debug)]
pub(crate) struct AnchorEntry {
    pub(crate) point:  [f32; 3],
    pub(crate) anchor: Anchor,
}

impl AnchorEntry {
    pub(crate) fn new(pos: Vec3, anchor: Anchor) -> Self {
        Self { point: pos.to_array(), anchor }
    }

    pub(crate) fn position(&self) -> Vec3 {
        Vec3::from(self.point)
    }
}

impl RTreeObject for AnchorEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AnchorEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}
