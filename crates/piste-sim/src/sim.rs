//! The `Sim` struct and its tick loop.

use piste_agent::{AgentRngs, AgentStore};
use piste_core::{AgentId, LiftId, SimClock, SimConfig, TrailId};
use piste_decision::{Candidate, DecisionEngine, GoalPlanner};
use piste_motion::{Completion, MotionConfig, MotionStore, Phase};
use piste_network::SkiNetwork;
use piste_traffic::TrafficState;

use crate::controller::Step;
use crate::{ControllerConfig, SimError, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<P>` owns every piece of state and drives the tick loop described in
/// the [crate docs](crate).  There is no global state: the traffic records
/// and decision engine live here and are passed down explicitly.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: GoalPlanner> {
    pub config: SimConfig,

    pub clock: SimClock,

    pub controller: ControllerConfig,

    pub motion_config: MotionConfig,

    /// Per-agent decision context (skill, goal, visited edges, personality).
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separate from `agents` so a context can
    /// be read while its RNG is borrowed mutably.
    pub rngs: AgentRngs,

    /// Phase and position of every agent.
    pub motion: MotionStore,

    /// Edge loads.  Mutated only through its event sinks.
    pub traffic: TrafficState,

    pub engine: DecisionEngine,

    pub planner: P,

    /// Private so topology changes go through [`replace_network`](Self::replace_network)
    /// or the `invalidate_*` methods, which keep the caches honest.
    pub(crate) network: SkiNetwork,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<P: GoalPlanner> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    pub fn network(&self) -> &SkiNetwork {
        &self.network
    }

    /// Flag `agent` as wanting a rest.  It heads for a lodge at its next
    /// decision point if one is within `lodge_search_radius`.
    pub fn set_wants_rest(&mut self, agent: AgentId, wants_rest: bool) -> SimResult<()> {
        let ctx = self.agents.get_mut(agent).ok_or(SimError::AgentNotFound(agent))?;
        ctx.wants_rest = wants_rest;
        Ok(())
    }

    /// Swap in a new topology.
    ///
    /// Traffic records are rebuilt and occupancy is recounted from agents
    /// currently on edges that still exist.  The downstream cache and every
    /// goal are dropped; goals are replanned at the next decision point.
    /// Agents on edges that no longer exist raise `EdgeLost` on the next tick.
    pub fn replace_network(&mut self, network: SkiNetwork) {
        self.network = network;
        self.traffic.clear();
        self.traffic.register_network(&self.network);
        for (i, state) in self.motion.states.iter().enumerate() {
            let agent = AgentId(i as u32);
            match state.phase {
                Phase::SkiingTrail { trail, .. } if self.network.trail(trail).is_some() => {
                    self.traffic.on_trail_entered(agent, trail);
                }
                Phase::RidingLift { lift, .. } if self.network.lift(lift).is_some() => {
                    self.traffic.on_lift_entered(agent, lift);
                }
                _ => {}
            }
        }
        self.topology_changed();
        log::debug!(
            "network replaced: {} trails, {} lifts; {} agents on edges",
            self.network.trail_count(),
            self.network.lift_count(),
            self.traffic.total_trail_occupancy() + self.traffic.total_lift_occupancy()
        );
    }

    /// Close `trail`.  Returns `false` if it was unknown or already closed.
    pub fn invalidate_trail(&mut self, trail: TrailId) -> bool {
        let changed = self.network.invalidate_trail(trail);
        if changed {
            self.topology_changed();
        }
        changed
    }

    /// Close `lift`.  Returns `false` if it was unknown or already closed.
    pub fn invalidate_lift(&mut self, lift: LiftId) -> bool {
        let changed = self.network.invalidate_lift(lift);
        if changed {
            self.topology_changed();
        }
        changed
    }

    fn topology_changed(&mut self) {
        self.engine.invalidate_downstream();
        self.agents.clear_goals();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let decisions = self.process_tick()?;
        for &(agent, chosen) in &decisions {
            observer.on_decision(now, agent, chosen);
        }
        observer.on_tick_end(now, decisions.len());
        if self.config.output_interval_ticks > 0 && now.0.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.motion, &self.agents, &self.traffic);
        }
        self.clock.advance();
        Ok(())
    }

    /// One tick.  Returns the routing decisions made, in order.
    pub(crate) fn process_tick(&mut self) -> SimResult<Vec<(AgentId, Candidate)>> {
        // ── ① Advance ─────────────────────────────────────────────────────
        let raised = self.advance_motion();

        // ── ② Resolve (sequential, ascending AgentId) ─────────────────────
        //
        // Intents are fired inside `resolve`/`scan_exits`, so every agent
        // sees the intents of the agents resolved before it.
        let mut decisions = Vec::new();
        let mut pending: Vec<(AgentId, Step)> = Vec::new();
        let mut raised = raised.into_iter().peekable();
        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            let completion = match raised.next_if(|&(a, _)| a == agent) {
                Some((_, c)) => c,
                None => Completion::None,
            };
            let step = if completion.is_none() {
                self.scan_exits(agent, &mut decisions)
            } else {
                Some(self.resolve(agent, completion, &mut decisions))
            };
            if let Some(step) = step {
                pending.push((agent, step));
            }
        }

        // ── ③ Apply ───────────────────────────────────────────────────────
        for (agent, step) in pending {
            self.apply(agent, step)?;
        }
        Ok(decisions)
    }

    fn advance_motion(&mut self) -> Vec<(AgentId, Completion)> {
        let dt = self.clock.tick_duration_secs;

        #[cfg(feature = "parallel")]
        if let Some(pool) = &self.pool {
            let (motion, network, config) = (&mut self.motion, &self.network, &self.motion_config);
            return pool.install(|| motion.advance_all(network, config, dt));
        }

        self.motion.advance_all(&self.network, &self.motion_config, dt)
    }
}

