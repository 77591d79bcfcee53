//! The `MotionStore`: motion state for every agent.

use piste_core::{AgentId, Vec3};
use piste_network::SkiNetwork;

use crate::{advance, Completion, MotionConfig, MotionError, MotionResult, MotionState};

/// Holds the [`MotionState`] of every agent.
///
/// `states` is indexed by `AgentId` and always has one entry per agent.
pub struct MotionStore {
    pub states: Vec<MotionState>,
}

impl MotionStore {
    /// `count` agents, all `Idle` at the origin and ready for placement.
    pub fn new(count: usize) -> Self {
        Self { states: vec![MotionState::idle_at(Vec3::ZERO); count] }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, agent: AgentId) -> Option<&MotionState> {
        self.states.get(agent.index())
    }

    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut MotionState> {
        self.states.get_mut(agent.index())
    }

    /// Like [`get_mut`](Self::get_mut) but an error for unknown agents.
    pub fn state_mut(&mut self, agent: AgentId) -> MotionResult<&mut MotionState> {
        self.states.get_mut(agent.index()).ok_or(MotionError::AgentNotFound(agent))
    }

    /// Advance every agent by `dt` and return the completions raised, in
    /// ascending agent order.
    ///
    /// Each agent only touches its own state, so with the `parallel` feature
    /// the pass runs on the rayon pool; the returned order is the same.
    pub fn advance_all(&mut self, network: &SkiNetwork, config: &MotionConfig, dt: f32) -> Vec<(AgentId, Completion)> {
        #[cfg(feature = "parallel")]
        let raised: Vec<Completion> = {
            use rayon::prelude::*;
            self.states
                .par_iter_mut()
                .enumerate()
                .map(|(i, s)| advance(s, AgentId(i as u32), network, config, dt))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let raised: Vec<Completion> = self
            .states
            .iter_mut()
            .enumerate()
            .map(|(i, s)| advance(s, AgentId(i as u32), network, config, dt))
            .collect();

        raised
            .into_iter()
            .enumerate()
            .filter(|(_, c)| !c.is_none())
            .map(|(i, c)| (AgentId(i as u32), c))
            .collect()
    }
}
