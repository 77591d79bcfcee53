//! The `GoalPlanner` trait: the seam to the long-horizon planner.

use piste_agent::{AgentContext, Goal};
use piste_core::AgentRng;
use piste_network::SkiNetwork;

/// Pluggable multi-hop planner.
///
/// The simulation treats plans as opaque: it asks for a new goal on spawn,
/// when the current goal is stale, and after the topology changes, then
/// consumes it one step at a time.  Returning `None` is fine; agents without
/// a goal still route purely on local scores.
///
/// Implementations must be `Send + Sync` so a simulation holding one can move
/// across threads.  Per-agent state belongs in [`AgentContext`], not in the
/// planner.
pub trait GoalPlanner: Send + Sync + 'static {
    fn plan(&self, ctx: &AgentContext, network: &SkiNetwork, rng: &mut AgentRng) -> Option<Goal>;
}

/// A [`GoalPlanner`] that never produces a goal.
pub struct NoopPlanner;

impl GoalPlanner for NoopPlanner {
    fn plan(&self, _ctx: &AgentContext, _network: &SkiNetwork, _rng: &mut AgentRng) -> Option<Goal> {
        None
    }
}
