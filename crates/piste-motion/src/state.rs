//! Per-agent motion state and phase entry.

use rustc_hash::FxHashSet;

use piste_core::{LiftId, LodgeId, TrailId, Vec3};
use piste_network::SkiNetwork;

use crate::{MotionError, MotionResult, Phase};

/// Motion state of one agent.
///
/// `position` is the tracked position that observers see.  The phase logic
/// never writes it directly; it computes a target and calls
/// [`track_towards`](Self::track_towards).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    pub phase: Phase,
    pub position: Vec3,
    /// Signed offset from the trail centre line, metres.  Positive is to the
    /// right of the direction of travel.
    pub lateral_offset: f32,
    /// Metres skied over the agent's life; drives the lateral noise.
    pub distance_travelled: f32,
    /// Unit facing direction.  Taken from the walk line, cable or trail
    /// tangent, never from how far the position moved.
    pub heading: Vec3,
    /// Lift bottoms already considered as a mid-run exit on this edge.
    pub checked_lifts: FxHashSet<LiftId>,
    /// Trail starts and crossings already considered on this edge.
    pub checked_trails: FxHashSet<TrailId>,
    /// Seconds skied since the last exit scan.
    pub since_exit_scan: f32,
}

impl MotionState {
    /// Unplaced agent at `position`, ready to be placed immediately.
    pub fn idle_at(position: Vec3) -> Self {
        Self {
            phase:              Phase::default(),
            position,
            lateral_offset:     0.0,
            distance_travelled: 0.0,
            heading:            Vec3::new(0.0, 0.0, 1.0),
            checked_lifts:      FxHashSet::default(),
            checked_trails:     FxHashSet::default(),
            since_exit_scan:    0.0,
        }
    }

    /// Switch to `phase`.  Clears the per-edge exit sets and the scan timer;
    /// this is the only place they are cleared.
    pub fn transition(&mut self, phase: Phase) {
        self.phase = phase;
        self.checked_lifts.clear();
        self.checked_trails.clear();
        self.since_exit_scan = 0.0;
    }

    /// Move the tracked position towards `target` by at most `max_step`
    /// metres.  Returns the distance actually moved.
    pub fn track_towards(&mut self, target: Vec3, max_step: f32) -> f32 {
        let next = self.position.move_towards(target, max_step);
        let moved = self.position.distance(next);
        self.position = next;
        moved
    }

    /// Heading as a yaw angle around `y`, radians; 0 faces `+z`.
    pub fn yaw(&self) -> f32 {
        self.heading.x.atan2(self.heading.z)
    }

    // ── Phase entry ───────────────────────────────────────────────────────────

    /// Start walking to the bottom station of `lift`.
    pub fn walk_to_lift(&mut self, lift: LiftId, network: &SkiNetwork) -> MotionResult<()> {
        let target = network.lift(lift).ok_or(MotionError::UnknownLift(lift))?.bottom;
        self.face(target);
        self.transition(Phase::WalkingToLift { lift, target });
        Ok(())
    }

    /// Step onto the cable at the bottom station.
    pub fn board_lift(&mut self, lift: LiftId, network: &SkiNetwork) -> MotionResult<()> {
        let l = network.lift(lift).ok_or(MotionError::UnknownLift(lift))?;
        self.heading = l.direction();
        self.lateral_offset = 0.0;
        self.transition(Phase::RidingLift { lift, fraction: 0.0 });
        Ok(())
    }

    /// Start skiing `trail` from the centre-line point nearest to the
    /// current position.  Any jump between that point and the current
    /// position is absorbed by the tracking cap.
    pub fn start_trail(&mut self, trail: TrailId, network: &SkiNetwork) -> MotionResult<()> {
        let t = network.trail(trail).ok_or(MotionError::UnknownTrail(trail))?;
        let progress = t.nearest_distance_along(self.position).clamp(0.0, t.length);
        self.heading = t.tangent_at(progress);
        self.transition(Phase::SkiingTrail { trail, progress });
        Ok(())
    }

    pub fn walk_to_lodge(&mut self, lodge: LodgeId, network: &SkiNetwork) -> MotionResult<()> {
        let target = network.lodge(lodge).ok_or(MotionError::UnknownLodge(lodge))?.position;
        self.face(target);
        self.transition(Phase::WalkingToLodge { lodge, target });
        Ok(())
    }

    /// Rest inside `lodge` for `secs`.
    pub fn rest(&mut self, lodge: LodgeId, secs: f32) {
        self.transition(Phase::InLodge { lodge, remaining_secs: secs.max(0.0) });
    }

    /// Unplace the agent; it asks to be placed again after `retry_secs`.
    pub fn idle(&mut self, retry_secs: f32) {
        self.transition(Phase::Idle { retry_secs: retry_secs.max(0.0) });
    }

    /// Point the heading horizontally at `target`; unchanged if already there.
    pub(crate) fn face(&mut self, target: Vec3) {
        let dir = Vec3::new(target.x - self.position.x, 0.0, target.z - self.position.z).normalized();
        if dir != Vec3::ZERO {
            self.heading = dir;
        }
    }
}
