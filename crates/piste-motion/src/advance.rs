//! One tick of motion for one agent.

use piste_core::{AgentId, Vec3};
use piste_network::SkiNetwork;

use crate::{lateral, Completion, MotionConfig, MotionState, Phase};

/// Advance `state` by `dt` seconds and report what, if anything, completed.
///
/// The phase itself is never changed here: a completed walk stays
/// `WalkingToLift` at its target, a finished trail stays `SkiingTrail` at
/// `progress == length`, until the controller transitions the agent.
pub fn advance(
    state:   &mut MotionState,
    agent:   AgentId,
    network: &SkiNetwork,
    config:  &MotionConfig,
    dt:      f32,
) -> Completion {
    let cap = config.max_speed() * dt;

    match state.phase {
        Phase::Idle { retry_secs } => {
            let left = retry_secs - dt;
            state.phase = Phase::Idle { retry_secs: left.max(0.0) };
            if left <= 0.0 { Completion::Ready } else { Completion::None }
        }

        Phase::WalkingToLift { lift, target } => {
            if network.lift(lift).is_none() {
                return Completion::EdgeLost;
            }
            state.face(target);
            state.track_towards(target, (config.walk_speed * dt).min(cap));
            if state.position.distance(target) <= config.arrival_tolerance {
                Completion::ReachedLift(lift)
            } else {
                Completion::None
            }
        }

        Phase::WalkingToLodge { lodge, target } => {
            if network.lodge(lodge).is_none() {
                return Completion::EdgeLost;
            }
            state.face(target);
            state.track_towards(target, (config.walk_speed * dt).min(cap));
            if state.position.distance(target) <= config.arrival_tolerance {
                Completion::ReachedLodge(lodge)
            } else {
                Completion::None
            }
        }

        Phase::RidingLift { lift, fraction } => {
            let Some(l) = network.lift(lift) else {
                return Completion::EdgeLost;
            };
            let step = if l.length > f32::EPSILON { config.lift_speed * dt / l.length } else { 1.0 };
            let fraction = (fraction + step).min(1.0);
            state.phase = Phase::RidingLift { lift, fraction };
            state.heading = l.direction();
            state.track_towards(l.position_at(fraction), cap);
            if fraction >= 1.0 { Completion::LiftTop(lift) } else { Completion::None }
        }

        Phase::SkiingTrail { trail, progress } => {
            let Some(t) = network.trail(trail) else {
                return Completion::EdgeLost;
            };
            let speed = config.ski_speed * config.slope_multiplier(t.slope_at(progress));
            let next = (progress + speed * dt).clamp(0.0, t.length);
            state.distance_travelled += next - progress;
            state.since_exit_scan += dt;
            state.phase = Phase::SkiingTrail { trail, progress: next };

            let tangent = t.tangent_at(next);
            let drift = lateral::drift_target(agent, state.distance_travelled, config.lateral.wavelength);
            state.lateral_offset =
                lateral::step_offset(state.lateral_offset, drift, t.width * 0.5, &config.lateral, dt);
            let side = tangent.horizontal_perpendicular();
            let target = t.position_at(next) + side * state.lateral_offset;

            if tangent != Vec3::ZERO {
                state.heading = tangent;
            }
            state.track_towards(target, cap);
            if next >= t.length { Completion::TrailEnd(trail) } else { Completion::None }
        }

        Phase::InLodge { lodge, remaining_secs } => {
            let left = remaining_secs - dt;
            state.phase = Phase::InLodge { lodge, remaining_secs: left.max(0.0) };
            if left <= 0.0 { Completion::Rested(lodge) } else { Completion::None }
        }
    }
}
