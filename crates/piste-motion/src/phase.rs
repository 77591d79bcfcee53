//! The phase enum and the completion signals raised by [`advance`](crate::advance).

use piste_core::{LiftId, LodgeId, TrailId, Vec3};

/// What an agent is doing right now.  Exactly one per agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Not placed on the network; retries placement when the timer runs out.
    Idle { retry_secs: f32 },
    /// Walking to the bottom station of `lift`.
    WalkingToLift { lift: LiftId, target: Vec3 },
    /// On the cable; `fraction` runs from 0 at the bottom to 1 at the top.
    RidingLift { lift: LiftId, fraction: f32 },
    /// `progress` is metres along the centre line, in `[0, length]`.
    SkiingTrail { trail: TrailId, progress: f32 },
    WalkingToLodge { lodge: LodgeId, target: Vec3 },
    InLodge { lodge: LodgeId, remaining_secs: f32 },
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle { .. } => "idle",
            Phase::WalkingToLift { .. } => "walking_to_lift",
            Phase::RidingLift { .. } => "riding_lift",
            Phase::SkiingTrail { .. } => "skiing_trail",
            Phase::WalkingToLodge { .. } => "walking_to_lodge",
            Phase::InLodge { .. } => "in_lodge",
        }
    }

    /// Trail being skied, if any.
    pub fn trail(&self) -> Option<TrailId> {
        match *self {
            Phase::SkiingTrail { trail, .. } => Some(trail),
            _ => None,
        }
    }

    /// Lift being walked to or ridden, if any.
    pub fn lift(&self) -> Option<LiftId> {
        match *self {
            Phase::WalkingToLift { lift, .. } | Phase::RidingLift { lift, .. } => Some(lift),
            _ => None,
        }
    }

    pub fn lodge(&self) -> Option<LodgeId> {
        match *self {
            Phase::WalkingToLodge { lodge, .. } | Phase::InLodge { lodge, .. } => Some(lodge),
            _ => None,
        }
    }

    /// `true` while the agent counts towards an edge's occupancy.
    pub fn occupies_edge(&self) -> bool {
        matches!(self, Phase::RidingLift { .. } | Phase::SkiingTrail { .. })
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle { retry_secs: 0.0 }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised at most once per tick by [`advance`](crate::advance).
///
/// The phase is left unchanged; the controller owning the agent decides the
/// next phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Completion {
    None,
    /// Arrived at the bottom station of the lift being walked to.
    ReachedLift(LiftId),
    /// Reached the top station.
    LiftTop(LiftId),
    /// Skied to the end of the trail.
    TrailEnd(TrailId),
    ReachedLodge(LodgeId),
    /// Rest time in the lodge is over.
    Rested(LodgeId),
    /// Idle retry timer ran out.
    Ready,
    /// The edge being walked to or traversed is no longer valid.
    EdgeLost,
}

impl Completion {
    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Completion::None)
    }
}
