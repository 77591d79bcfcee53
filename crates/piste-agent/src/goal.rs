//! Multi-hop goals produced by an external planner.
//!
//! The simulation never looks inside a goal beyond its current step: a goal
//! is an ordered list of edges to ride or ski, a cursor, and the trail the
//! planner was ultimately aiming for.  When the cursor runs off the end the
//! goal is stale and the owner asks the planner for a new one.

use piste_core::{LiftId, TrailId};

/// One step of a goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalStep {
    RideLift(LiftId),
    SkiTrail(TrailId),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub steps:             Vec<GoalStep>,
    pub cursor:            usize,
    pub completed:         bool,
    pub destination_trail: Option<TrailId>,
}

impl Goal {
    pub fn new(steps: Vec<GoalStep>, destination_trail: Option<TrailId>) -> Self {
        let completed = steps.is_empty();
        Self { steps, cursor: 0, completed, destination_trail }
    }

    /// The step the agent is currently working towards.
    pub fn current(&self) -> Option<GoalStep> {
        if self.completed {
            return None;
        }
        self.steps.get(self.cursor).copied()
    }

    /// Move the cursor to the next step.  Marks the goal completed when the
    /// last step is consumed.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        self.cursor += 1;
        if self.cursor >= self.steps.len() {
            self.completed = true;
        }
    }

    /// Advance if `step` is the current step.  Returns whether it matched.
    pub fn advance_if(&mut self, step: GoalStep) -> bool {
        if self.current() == Some(step) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// A stale goal has nothing left to offer and should be replaced.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.completed || self.cursor >= self.steps.len()
    }

    pub fn remaining(&self) -> &[GoalStep] {
        self.steps.get(self.cursor..).unwrap_or(&[])
    }
}
