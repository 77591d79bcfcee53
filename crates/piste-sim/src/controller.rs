//! Per-agent controller: what happens at each decision point.
//!
//! `resolve` and `scan_exits` run in the resolve pass and only decide; any
//! chosen edge has its intent recorded before they return.  `apply` runs in
//! the apply pass and performs the phase change plus the occupancy events.

use piste_core::{AgentId, LiftId, LodgeId, TrailId, Vec3};
use piste_decision::{Candidate, GoalPlanner};
use piste_motion::{Completion, Phase};
use piste_network::Anchor;

use crate::{Sim, SimError, SimResult};

/// How the agent leaves the edge it is on, if it is on one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Leave {
    Nothing,
    /// Finished normally, or left through a mid-run exit.
    Completed,
    /// Left because the edge disappeared.
    Exited,
}

/// Phase to enter in the apply pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Next {
    WalkToLift(LiftId),
    BoardLift(LiftId),
    SkiTrail(TrailId),
    WalkToLodge(LodgeId),
    Rest(LodgeId),
    Idle,
}

impl From<Candidate> for Next {
    fn from(c: Candidate) -> Self {
        match c {
            Candidate::Trail(t) => Next::SkiTrail(t),
            Candidate::Lift(l) => Next::WalkToLift(l),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Step {
    pub leave: Leave,
    pub next:  Next,
}

impl<P: GoalPlanner> Sim<P> {
    // ── Resolve pass ──────────────────────────────────────────────────────

    pub(crate) fn resolve(
        &mut self,
        agent:      AgentId,
        completion: Completion,
        decisions:  &mut Vec<(AgentId, Candidate)>,
    ) -> Step {
        match completion {
            Completion::None | Completion::Ready | Completion::Rested(_) => Step {
                leave: Leave::Nothing,
                next:  self.place(agent, decisions),
            },
            Completion::ReachedLift(lift) => Step { leave: Leave::Nothing, next: Next::BoardLift(lift) },
            Completion::ReachedLodge(lodge) => Step { leave: Leave::Nothing, next: Next::Rest(lodge) },
            Completion::LiftTop(lift) => {
                self.replan(agent, self.controller.replan_at_lift_top);
                let candidates: Vec<Candidate> =
                    self.network.trails_from_lift(lift).map(Candidate::Trail).collect();
                let next = match self.decide(agent, &candidates, decisions) {
                    Some(next) => next,
                    None => {
                        log::debug!("{agent}: no trail at the top of {lift}");
                        self.place(agent, decisions)
                    }
                };
                Step { leave: Leave::Completed, next }
            }
            Completion::TrailEnd(trail) => {
                self.replan(agent, self.controller.replan_after_every_run);
                if let Some(lodge) = self.lodge_if_resting(agent) {
                    return Step { leave: Leave::Completed, next: Next::WalkToLodge(lodge) };
                }
                let candidates: Vec<Candidate> = self
                    .network
                    .lifts_after_trail(trail)
                    .map(Candidate::Lift)
                    .chain(self.network.trails_after_trail(trail).map(Candidate::Trail))
                    .collect();
                let next = match self.decide(agent, &candidates, decisions) {
                    Some(next) => next,
                    None => {
                        log::debug!("{agent}: dead end at the bottom of {trail}");
                        self.place(agent, decisions)
                    }
                };
                Step { leave: Leave::Completed, next }
            }
            Completion::EdgeLost => {
                log::debug!("{agent}: edge lost, re-routing");
                Step { leave: Leave::Exited, next: self.place(agent, decisions) }
            }
        }
    }

    /// Mid-run exit scan for a skier whose scan interval has elapsed.
    ///
    /// Every lift bottom, trail start and trail crossing within the detection
    /// radius is considered at most once per run.  Returns the step for the
    /// first exit taken.
    pub(crate) fn scan_exits(&mut self, agent: AgentId, decisions: &mut Vec<(AgentId, Candidate)>) -> Option<Step> {
        let interval = self.controller.exit_scan_interval_secs;
        let state = self.motion.get_mut(agent)?;
        let Phase::SkiingTrail { trail: current, .. } = state.phase else {
            return None;
        };
        if state.since_exit_scan < interval {
            return None;
        }
        state.since_exit_scan = 0.0;

        let mut fresh = Vec::new();
        for (anchor, _) in self.network.anchors_within(state.position, self.controller.exit_detection_radius) {
            match anchor {
                Anchor::LiftBottom(l) => {
                    if state.checked_lifts.insert(l) {
                        fresh.push(Candidate::Lift(l));
                    }
                }
                Anchor::TrailStart(t) | Anchor::TrailPoint { trail: t, .. } if t != current => {
                    if state.checked_trails.insert(t) {
                        fresh.push(Candidate::Trail(t));
                    }
                }
                _ => {}
            }
        }

        for candidate in fresh {
            if self.take_exit(agent, current, candidate) {
                self.record_intent(agent, candidate, decisions);
                return Some(Step { leave: Leave::Completed, next: candidate.into() });
            }
        }
        None
    }

    /// Binary choice between staying on `current` and leaving for `candidate`.
    fn take_exit(&mut self, agent: AgentId, current: TrailId, candidate: Candidate) -> bool {
        let (Some(ctx), Some(rng)) = (self.agents.get(agent), self.rngs.get_mut(agent)) else {
            return false;
        };
        let stay = self.engine.score(Candidate::Trail(current), ctx, &self.network, &self.traffic);
        let base = self.engine.score(candidate, ctx, &self.network, &self.traffic);
        if base <= 0.0 {
            return false;
        }
        let (novel, deficit) = match candidate {
            Candidate::Trail(t) => (!ctx.visited.has_skied(t), self.traffic.trail_deficit(t)),
            Candidate::Lift(l) => (!ctx.visited.has_ridden(l), self.traffic.lift_deficit(l)),
        };
        let novelty = if novel { self.controller.exit_novelty_bonus } else { 0.0 };
        let switch = base + novelty + self.controller.exit_deficit_bonus * deficit;
        let leave = self.engine.choose_switch(stay, switch, rng);
        log::trace!("{agent} exit check {candidate}: stay {stay:.3} vs switch {switch:.3}, leave={leave}");
        leave
    }

    /// Run the engine over `candidates` and record the intent for the pick.
    fn decide(
        &mut self,
        agent:      AgentId,
        candidates: &[Candidate],
        decisions:  &mut Vec<(AgentId, Candidate)>,
    ) -> Option<Next> {
        let (Some(ctx), Some(rng)) = (self.agents.get(agent), self.rngs.get_mut(agent)) else {
            return None;
        };
        let chosen = self.engine.choose(candidates, ctx, &self.network, &self.traffic, rng)?;
        self.record_intent(agent, chosen, decisions);
        Some(chosen.into())
    }

    fn record_intent(&mut self, agent: AgentId, chosen: Candidate, decisions: &mut Vec<(AgentId, Candidate)>) {
        match chosen {
            Candidate::Trail(t) => self.traffic.on_trail_intended(agent, t),
            Candidate::Lift(l) => self.traffic.on_lift_intended(agent, l),
        }
        decisions.push((agent, chosen));
    }

    /// Ask the planner for a goal when the current one is stale, or always
    /// when `force` is set.
    fn replan(&mut self, agent: AgentId, force: bool) {
        let (Some(ctx), Some(rng)) = (self.agents.get(agent), self.rngs.get_mut(agent)) else {
            return;
        };
        if !force && !ctx.needs_goal() {
            return;
        }
        let goal = self.planner.plan(ctx, &self.network, rng);
        if let Some(ctx) = self.agents.get_mut(agent) {
            ctx.goal = goal;
        }
    }

    fn lodge_if_resting(&self, agent: AgentId) -> Option<LodgeId> {
        if !self.agents.get(agent)?.wants_rest {
            return None;
        }
        let pos = self.motion.get(agent)?.position;
        self.network.lodges_within(pos, self.controller.lodge_search_radius).first().copied()
    }

    // ── Fallback ladder ───────────────────────────────────────────────────

    /// Put `agent` back on the network from wherever it is.
    ///
    /// Lodge if resting, otherwise lift bottoms and trail starts within a
    /// radius that grows up to the cap, then [`nearest_lift_fallback`](Self::nearest_lift_fallback).
    fn place(&mut self, agent: AgentId, decisions: &mut Vec<(AgentId, Candidate)>) -> Next {
        self.replan(agent, false);
        if let Some(lodge) = self.lodge_if_resting(agent) {
            return Next::WalkToLodge(lodge);
        }
        let Some(pos) = self.motion.get(agent).map(|s| s.position) else {
            return Next::Idle;
        };

        let mut radius = self.controller.search_radius;
        loop {
            let candidates: Vec<Candidate> = self
                .network
                .lift_bottoms_within(pos, radius)
                .into_iter()
                .map(Candidate::Lift)
                .chain(self.network.trail_starts_within(pos, radius).into_iter().map(Candidate::Trail))
                .collect();
            if let Some(next) = self.decide(agent, &candidates, decisions) {
                return next;
            }
            if radius >= self.controller.fallback_radius_cap {
                break;
            }
            radius = (radius * self.controller.fallback_radius_growth).min(self.controller.fallback_radius_cap);
            log::debug!("{agent}: nothing nearby, widening search to {radius:.0} m");
        }
        self.nearest_lift_fallback(agent, pos, decisions)
    }

    /// Last rungs of the ladder: nearest lift bottom at any distance, then
    /// nearest lodge, then idle.
    fn nearest_lift_fallback(&mut self, agent: AgentId, pos: Vec3, decisions: &mut Vec<(AgentId, Candidate)>) -> Next {
        if let Some(lift) = self.network.nearest_lift_bottom(pos) {
            log::debug!("{agent}: walking to nearest lift {lift}");
            self.record_intent(agent, Candidate::Lift(lift), decisions);
            return Next::WalkToLift(lift);
        }
        if let Some(lodge) = self.network.nearest_lodge(pos) {
            log::warn!("{agent}: no open lift anywhere, sheltering in {lodge}");
            return Next::WalkToLodge(lodge);
        }
        log::warn!("{agent}: stranded at {pos}, retrying in {}s", self.controller.idle_retry_secs);
        Next::Idle
    }

    // ── Apply pass ────────────────────────────────────────────────────────

    pub(crate) fn apply(&mut self, agent: AgentId, step: Step) -> SimResult<()> {
        let state = self.motion.state_mut(agent)?;
        let ctx = self.agents.get_mut(agent).ok_or(SimError::AgentNotFound(agent))?;

        match (step.leave, state.phase) {
            (Leave::Completed, Phase::SkiingTrail { trail, .. }) => self.traffic.on_trail_completed(agent, trail),
            (Leave::Completed, Phase::RidingLift { lift, .. }) => self.traffic.on_lift_completed(agent, lift),
            (Leave::Exited, Phase::SkiingTrail { trail, .. }) => self.traffic.on_trail_exited(agent, trail),
            (Leave::Exited, Phase::RidingLift { lift, .. }) => self.traffic.on_lift_exited(agent, lift),
            _ => {}
        }

        let entered = match step.next {
            Next::WalkToLift(lift) => state.walk_to_lift(lift, &self.network),
            Next::BoardLift(lift) => state.board_lift(lift, &self.network).map(|()| {
                self.traffic.on_lift_entered(agent, lift);
                ctx.enter_lift(lift);
            }),
            Next::SkiTrail(trail) => state.start_trail(trail, &self.network).map(|()| {
                self.traffic.on_trail_entered(agent, trail);
                ctx.enter_trail(trail);
            }),
            Next::WalkToLodge(lodge) => state.walk_to_lodge(lodge, &self.network),
            Next::Rest(lodge) => {
                state.rest(lodge, self.controller.lodge_rest_secs);
                ctx.wants_rest = false;
                Ok(())
            }
            Next::Idle => {
                state.idle(self.controller.idle_retry_secs);
                Ok(())
            }
        };
        if let Err(e) = entered {
            log::warn!("{agent}: {e}; idling");
            state.idle(self.controller.idle_retry_secs);
        }
        Ok(())
    }
}
