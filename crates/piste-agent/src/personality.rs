//! Fixed per-agent perturbation of the scoring weights.
//!
//! Every agent carries eight small offsets, one per scoring [`Factor`].  The
//! decision engine multiplies each configured weight by `1 + offset`, so two
//! agents with identical skill and goal still diverge slightly, and always in
//! the same direction.
//!
//! Offsets are a pure function of the agent id (see
//! [`AgentRng::for_identity`]): they do not depend on the run seed and are
//! never regenerated during the agent's life.

use piste_core::{AgentId, AgentRng};

/// The scoring factors, in the order their offsets are stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Factor {
    Preference = 0,
    Downstream = 1,
    Deficit    = 2,
    Goal       = 3,
    Novelty    = 4,
    Crowding   = 5,
    Traversal  = 6,
    Herding    = 7,
}

impl Factor {
    pub const COUNT: usize = 8;

    pub const ALL: [Factor; Factor::COUNT] = [
        Factor::Preference,
        Factor::Downstream,
        Factor::Deficit,
        Factor::Goal,
        Factor::Novelty,
        Factor::Crowding,
        Factor::Traversal,
        Factor::Herding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Factor::Preference => "preference",
            Factor::Downstream => "downstream",
            Factor::Deficit    => "deficit",
            Factor::Goal       => "goal",
            Factor::Novelty    => "novelty",
            Factor::Crowding   => "crowding",
            Factor::Traversal  => "traversal",
            Factor::Herding    => "herding",
        }
    }
}

/// One offset per [`Factor`], each in `[-spread, spread]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalityOffsets(pub [f32; Factor::COUNT]);

impl PersonalityOffsets {
    /// All offsets zero: the agent uses the configured weights unchanged.
    pub const NEUTRAL: PersonalityOffsets = PersonalityOffsets([0.0; Factor::COUNT]);

    /// Derive the offsets for `agent`.  The same `(agent, spread)` pair always
    /// yields the same offsets.
    pub fn generate(agent: AgentId, spread: f32) -> Self {
        if !(spread > 0.0) {
            return Self::NEUTRAL;
        }
        let mut rng = AgentRng::for_identity(agent);
        let mut offsets = [0.0_f32; Factor::COUNT];
        for o in &mut offsets {
            *o = rng.gen_range(-spread..=spread);
        }
        PersonalityOffsets(offsets)
    }

    #[inline]
    pub fn get(&self, factor: Factor) -> f32 {
        self.0[factor as usize]
    }

    /// `weight` perturbed by this agent's offset for `factor`.
    #[inline]
    pub fn apply(&self, factor: Factor, weight: f32) -> f32 {
        weight * (1.0 + self.get(factor))
    }
}
