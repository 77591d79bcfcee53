//! Agent storage: `AgentStore` (contexts) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live apart from the contexts so a caller can hold `&mut AgentRngs`
//! and `&AgentStore` at the same time, e.g. when a decision reads one agent's
//! context while drawing from that agent's RNG.

use piste_core::{AgentId, AgentRng};

use crate::AgentContext;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// One [`AgentContext`] per agent; the `AgentId` value is the index.
pub struct AgentStore {
    /// Number of agents.  Equals `contexts.len()`.
    pub count:              usize,
    pub contexts:           Vec<AgentContext>,
    /// Half-width the personality offsets were drawn with.
    pub personality_spread: f32,
}

impl AgentStore {
    pub(crate) fn new(contexts: Vec<AgentContext>, personality_spread: f32) -> Self {
        Self { count: contexts.len(), contexts, personality_spread }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&AgentContext> {
        self.contexts.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentContext> {
        self.contexts.get_mut(agent.index())
    }

    /// Drop every agent's goal so it is replanned on demand.
    pub fn clear_goals(&mut self) {
        for ctx in &mut self.contexts {
            ctx.goal = None;
        }
    }
}
