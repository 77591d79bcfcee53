//! Per-visitor random streams.
//!
//! Every visitor owns one [`AgentRng`] for the choices it makes during a run
//! (softmax draws, wildcard picks, exit coin flips).  The stream is seeded
//! from the run seed and the visitor's id only, so a visitor's choices do not
//! shift when the population size or processing order changes.
//!
//! A second, run-independent stream ([`AgentRng::for_identity`]) feeds traits
//! that belong to the visitor rather than to the run, such as personality.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Golden-ratio multiplier; spreads consecutive ids across the seed space.
const ID_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Keeps identity streams disjoint from any run-seeded stream.
const IDENTITY_SALT: u64 = 0x5851_f42d_4c95_7f2d;

pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Stream for `agent` in the run seeded with `run_seed`.
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        Self::from_mixed(run_seed ^ (agent.0 as u64).wrapping_mul(ID_SPREAD))
    }

    /// Stream that depends on `agent` alone.
    pub fn for_identity(agent: AgentId) -> Self {
        Self::from_mixed(IDENTITY_SALT ^ (agent.0 as u64 + 1).wrapping_mul(ID_SPREAD))
    }

    fn from_mixed(seed: u64) -> Self {
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// A value from the `Standard` distribution (`f32` in `[0, 1)`, any `u64`, …).
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Bernoulli draw.  `p` outside `[0, 1]` is clamped rather than rejected.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick from `options`; `None` when empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.0)
    }
}
