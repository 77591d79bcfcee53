//! Fluent builder for constructing a [`Sim`].

use piste_agent::{AgentRngs, AgentStore};
use piste_core::{SimConfig, Vec3};
use piste_decision::{DecisionConfig, DecisionEngine, GoalPlanner, PreferenceTable};
use piste_motion::{MotionConfig, MotionStore};
use piste_network::SkiNetwork;
use piste_traffic::{TrafficConfig, TrafficState};

use crate::{ControllerConfig, ResortConfig, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, total ticks, seed, …
/// - [`SkiNetwork`]: the resort topology
/// - [`AgentStore`] + [`AgentRngs`]: from [`piste_agent::AgentStoreBuilder`]
/// - `P: GoalPlanner`: the long-horizon planner ([`piste_decision::NoopPlanner`]
///   if there is none)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                          |
/// |--------------------------|----------------------------------|
/// | `.decision(c)`           | `DecisionConfig::default()`      |
/// | `.preferences(t)`        | `PreferenceTable::default()`     |
/// | `.motion(c)`             | `MotionConfig::default()`        |
/// | `.controller(c)`         | `ControllerConfig::default()`    |
/// | `.traffic(c)`            | `TrafficConfig::default()`       |
/// | `.resort(c)`             | sets all of the above and `SimConfig` |
/// | `.initial_positions(v)`  | every agent at the origin        |
///
/// Every agent starts `Idle` and is placed by the controller on the first
/// tick.
pub struct SimBuilder<P: GoalPlanner> {
    config:      SimConfig,
    network:     SkiNetwork,
    agents:      AgentStore,
    rngs:        AgentRngs,
    planner:     P,
    decision:    DecisionConfig,
    preferences: PreferenceTable,
    motion:      MotionConfig,
    controller:  ControllerConfig,
    traffic:     TrafficConfig,
    positions:   Option<Vec<Vec3>>,
}

impl<P: GoalPlanner> SimBuilder<P> {
    pub fn new(
        config:  SimConfig,
        network: SkiNetwork,
        agents:  AgentStore,
        rngs:    AgentRngs,
        planner: P,
    ) -> Self {
        Self {
            config,
            network,
            agents,
            rngs,
            planner,
            decision:    DecisionConfig::default(),
            preferences: PreferenceTable::default(),
            motion:      MotionConfig::default(),
            controller:  ControllerConfig::default(),
            traffic:     TrafficConfig::default(),
            positions:   None,
        }
    }

    pub fn decision(mut self, decision: DecisionConfig) -> Self {
        self.decision = decision;
        self
    }

    pub fn preferences(mut self, preferences: PreferenceTable) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    pub fn traffic(mut self, traffic: TrafficConfig) -> Self {
        self.traffic = traffic;
        self
    }

    /// Replace every configuration section, `SimConfig` included.
    pub fn resort(mut self, resort: ResortConfig) -> Self {
        self.config = resort.sim;
        self.decision = resort.decision;
        self.preferences = resort.preferences;
        self.motion = resort.motion;
        self.controller = resort.controller;
        self.traffic = resort.traffic;
        self
    }

    /// Starting position of each agent; must be length `agent_count`.
    pub fn initial_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, register the network with traffic state and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        let agent_count = self.agents.count;

        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        self.motion.validate()?;
        self.controller.validate()?;
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        let positions = match self.positions {
            Some(p) if p.len() != agent_count => {
                return Err(SimError::AgentCountMismatch {
                    expected: agent_count,
                    got:      p.len(),
                    what:     "initial positions",
                });
            }
            Some(p) => p,
            None => vec![Vec3::ZERO; agent_count],
        };
        if self.agents.personality_spread != self.decision.personality_spread {
            return Err(SimError::Config(format!(
                "agents were built with personality spread {} but the decision config says {}",
                self.agents.personality_spread, self.decision.personality_spread
            )));
        }
        let engine = DecisionEngine::new(self.decision, self.preferences)?;

        // ── Wire up state ─────────────────────────────────────────────────
        let mut traffic = TrafficState::new(&self.traffic);
        traffic.register_network(&self.network);

        let mut motion = MotionStore::new(agent_count);
        for (state, pos) in motion.states.iter_mut().zip(positions) {
            state.position = pos;
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        log::debug!(
            "sim built: {agent_count} agents, {} trails, {} lifts",
            self.network.trail_count(),
            self.network.lift_count()
        );

        Ok(Sim {
            clock:         self.config.make_clock(),
            config:        self.config,
            controller:    self.controller,
            motion_config: self.motion,
            agents:        self.agents,
            rngs:          self.rngs,
            motion,
            traffic,
            engine,
            planner:       self.planner,
            network:       self.network,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
