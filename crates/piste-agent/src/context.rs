//! Everything the decision engine needs to know about one visitor.

use rustc_hash::FxHashSet;

use piste_core::{AgentId, LiftId, SkillLevel, TrailId};

use crate::{Goal, GoalStep, PersonalityOffsets};

/// Edges this agent has used at least once, for novelty scoring.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitedEdges {
    pub trails: FxHashSet<TrailId>,
    pub lifts:  FxHashSet<LiftId>,
}

impl VisitedEdges {
    #[inline]
    pub fn has_skied(&self, trail: TrailId) -> bool {
        self.trails.contains(&trail)
    }

    #[inline]
    pub fn has_ridden(&self, lift: LiftId) -> bool {
        self.lifts.contains(&lift)
    }

    pub fn len(&self) -> usize {
        self.trails.len() + self.lifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty() && self.lifts.is_empty()
    }
}

/// Per-visitor decision context.  Lives as long as the agent.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentContext {
    pub id:          AgentId,
    pub skill:       SkillLevel,
    pub goal:        Option<Goal>,
    pub visited:     VisitedEdges,
    /// Fixed at construction; never regenerated.
    pub personality: PersonalityOffsets,
    /// Set by the external needs model; the controller prefers a lodge at the
    /// next decision point while this is `true`.
    pub wants_rest:  bool,
}

impl AgentContext {
    pub fn new(id: AgentId, skill: SkillLevel, personality_spread: f32) -> Self {
        Self {
            id,
            skill,
            goal:        None,
            visited:     VisitedEdges::default(),
            personality: PersonalityOffsets::generate(id, personality_spread),
            wants_rest:  false,
        }
    }

    /// The goal step currently being pursued, if any.
    #[inline]
    pub fn goal_step(&self) -> Option<GoalStep> {
        self.goal.as_ref().and_then(Goal::current)
    }

    /// `true` when there is no goal or the goal has been exhausted.
    pub fn needs_goal(&self) -> bool {
        self.goal.as_ref().is_none_or(Goal::is_stale)
    }

    /// Record that the agent started skiing `trail`.
    pub fn enter_trail(&mut self, trail: TrailId) {
        self.visited.trails.insert(trail);
        if let Some(goal) = self.goal.as_mut() {
            goal.advance_if(GoalStep::SkiTrail(trail));
        }
    }

    /// Record that the agent boarded `lift`.
    pub fn enter_lift(&mut self, lift: LiftId) {
        self.visited.lifts.insert(lift);
        if let Some(goal) = self.goal.as_mut() {
            goal.advance_if(GoalStep::RideLift(lift));
        }
    }
}
