//! Candidate scoring.
//!
//! [`score_factors`] is a pure function of already-gathered factors, so the
//! scoring rules can be tested without a network.  Gathering the factors
//! (preference lookup, lookahead, traffic signals) is done by
//! [`DecisionEngine`](crate::DecisionEngine).

use piste_agent::{Factor, PersonalityOffsets};
use piste_core::{LiftId, TrailId};

use crate::{DecisionConfig, Preference};

/// An edge an agent may choose next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Candidate {
    Trail(TrailId),
    Lift(LiftId),
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidate::Trail(t) => write!(f, "{t}"),
            Candidate::Lift(l) => write!(f, "{l}"),
        }
    }
}

/// Raw inputs to the score of one candidate for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CandidateFactors {
    /// Skill/class gate and direct comfort weight.
    pub access:     Preference,
    /// Downstream lookahead value.
    pub downstream: f32,
    /// Traffic deficit (signed).
    pub deficit:    f32,
    /// Candidate is the agent's current goal step.
    pub goal_match: bool,
    /// Agent has never used this edge.
    pub novel:      bool,
    /// Traffic crowding (penalty).
    pub crowding:   f32,
    /// Transit comfort for the candidate's class.
    pub traversal:  f32,
    /// Share of recent intents naming this edge (penalty).
    pub herding:    f32,
}

impl CandidateFactors {
    /// Factors of an edge that only passes the skill gate; every other signal
    /// neutral.
    pub fn neutral(access: Preference) -> Self {
        Self {
            access,
            downstream: 0.0,
            deficit:    0.0,
            goal_match: false,
            novel:      false,
            crowding:   0.0,
            traversal:  0.0,
            herding:    0.0,
        }
    }
}

/// Score a candidate from its factors.
///
/// * `Disallowed` → exactly `0.0`.
/// * `DesperateOnly` → `config.desperate_score`, nothing else considered.
/// * otherwise the personality-perturbed weighted sum, floored at
///   `config.score_floor`.
///
/// The result is therefore either `0.0` or `>= score_floor`.
pub fn score_factors(f: &CandidateFactors, personality: &PersonalityOffsets, config: &DecisionConfig) -> f32 {
    let pref = match f.access {
        Preference::Disallowed => return 0.0,
        Preference::DesperateOnly => return config.desperate_score,
        Preference::Allowed(w) => w,
    };

    let w = &config.weights;
    let p = personality;
    let flag = |b: bool| if b { 1.0 } else { 0.0 };

    let raw = p.apply(Factor::Preference, w.preference) * pref
        + p.apply(Factor::Downstream, w.downstream) * f.downstream
        + p.apply(Factor::Deficit, w.deficit) * f.deficit
        + p.apply(Factor::Goal, w.goal) * flag(f.goal_match)
        + p.apply(Factor::Novelty, w.novelty) * flag(f.novel)
        - p.apply(Factor::Crowding, w.crowding) * f.crowding
        + p.apply(Factor::Traversal, w.traversal) * f.traversal
        - p.apply(Factor::Herding, w.herding) * f.herding;

    if !raw.is_finite() {
        return config.score_floor;
    }
    raw.max(config.score_floor)
}
