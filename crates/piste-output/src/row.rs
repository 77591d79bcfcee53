//! Plain data row types written by output backends.

use piste_motion::{MotionState, Phase};

/// Sentinel for "no edge" in `edge_id` columns.
pub const NO_EDGE: u32 = u32::MAX;

/// One agent's motion state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:       u32,
    pub tick:           u64,
    pub skill:          &'static str,
    pub phase:          &'static str,
    /// `"trail"`, `"lift"`, `"lodge"` or `""`.
    pub edge_kind:      &'static str,
    /// Id of the trail, lift or lodge; [`NO_EDGE`] when idle.
    pub edge_id:        u32,
    /// Metres along a trail, ride fraction on a lift, seconds left in a
    /// lodge or before an idle retry, metres left when walking.
    pub progress:       f32,
    pub x:              f32,
    pub y:              f32,
    pub z:              f32,
    pub yaw:            f32,
    pub lateral_offset: f32,
}

impl AgentSnapshotRow {
    pub fn from_state(agent_id: u32, tick: u64, skill: &'static str, state: &MotionState) -> Self {
        let (edge_kind, edge_id, progress) = match state.phase {
            Phase::Idle { retry_secs } => ("", NO_EDGE, retry_secs),
            Phase::WalkingToLift { lift, target } => ("lift", lift.0, state.position.distance(target)),
            Phase::RidingLift { lift, fraction } => ("lift", lift.0, fraction),
            Phase::SkiingTrail { trail, progress } => ("trail", trail.0, progress),
            Phase::WalkingToLodge { lodge, target } => ("lodge", lodge.0, state.position.distance(target)),
            Phase::InLodge { lodge, remaining_secs } => ("lodge", lodge.0, remaining_secs),
        };
        Self {
            agent_id,
            tick,
            skill,
            phase: state.phase.as_str(),
            edge_kind,
            edge_id,
            progress,
            x: state.position.x,
            y: state.position.y,
            z: state.position.z,
            yaw: state.yaw(),
            lateral_offset: state.lateral_offset,
        }
    }
}

/// Load on one trail or lift at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLoadRow {
    pub tick:      u64,
    /// `"trail"` or `"lift"`.
    pub kind:      &'static str,
    pub edge_id:   u32,
    pub capacity:  f32,
    pub occupancy: u32,
    pub deficit:   f32,
    pub crowding:  f32,
}

/// Summary for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub decisions:    u64,
}
