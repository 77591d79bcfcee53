//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use piste_agent::AgentStoreBuilder;
//! use piste_core::SkillLevel;
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, /*seed=*/ 42)
//!     .skills(vec![SkillLevel::Beginner, SkillLevel::Advanced, SkillLevel::Expert])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(rngs.len(),  3);
//! ```

use piste_core::{AgentId, SkillLevel};

use crate::{AgentContext, AgentError, AgentResult, AgentRngs, AgentStore};

/// Default half-width of the personality offset range.
pub const DEFAULT_PERSONALITY_SPREAD: f32 = 0.15;

pub struct AgentStoreBuilder {
    count:  usize,
    seed:   u64,
    skills: Option<Vec<SkillLevel>>,
    spread: f32,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, skills: None, spread: DEFAULT_PERSONALITY_SPREAD }
    }

    /// One skill level per agent, indexed by `AgentId`.  Without this every
    /// agent is [`SkillLevel::Intermediate`].
    pub fn skills(mut self, skills: Vec<SkillLevel>) -> Self {
        self.skills = Some(skills);
        self
    }

    /// Half-width of the personality offset range.
    pub fn personality_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn build(self) -> AgentResult<(AgentStore, AgentRngs)> {
        if !(0.0..1.0).contains(&self.spread) {
            return Err(AgentError::InvalidSpread(self.spread));
        }
        let skills = match self.skills {
            Some(s) if s.len() != self.count => {
                return Err(AgentError::SkillCountMismatch { expected: self.count, got: s.len() });
            }
            Some(s) => s,
            None => vec![SkillLevel::Intermediate; self.count],
        };

        let contexts = skills
            .into_iter()
            .enumerate()
            .map(|(i, skill)| AgentContext::new(AgentId(i as u32), skill, self.spread))
            .collect();

        Ok((AgentStore::new(contexts, self.spread), AgentRngs::new(self.count, self.seed)))
    }
}
