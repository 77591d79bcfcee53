//! Tunable knobs for scoring, selection and lookahead.

use crate::{DecisionError, DecisionResult};

// ── DecisionWeights ───────────────────────────────────────────────────────────

/// Per-factor weights.  Crowding and herding are subtracted, the rest added.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionWeights {
    pub preference: f32,
    pub downstream: f32,
    pub deficit:    f32,
    pub goal:       f32,
    pub novelty:    f32,
    pub crowding:   f32,
    pub traversal:  f32,
    pub herding:    f32,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            preference: 1.0,
            downstream: 0.6,
            deficit:    0.4,
            goal:       1.5,
            novelty:    0.3,
            crowding:   0.5,
            traversal:  0.3,
            herding:    0.4,
        }
    }
}

impl DecisionWeights {
    pub fn validate(&self) -> DecisionResult<()> {
        let named = [
            ("preference", self.preference),
            ("downstream", self.downstream),
            ("deficit",    self.deficit),
            ("goal",       self.goal),
            ("novelty",    self.novelty),
            ("crowding",   self.crowding),
            ("traversal",  self.traversal),
            ("herding",    self.herding),
        ];
        for (name, value) in named {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DecisionError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

// ── LookaheadConfig ───────────────────────────────────────────────────────────

/// Depth and per-hop discount of the downstream lookahead.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LookaheadConfig {
    /// Maximum number of hops explored beyond the evaluated edge.
    pub max_depth: u32,
    /// `discounts[h - 1]` weights terrain found `h` hops away; hops past the
    /// end of the table reuse the last entry.
    pub discounts: Vec<f32>,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self { max_depth: 4, discounts: vec![1.0, 0.7, 0.45, 0.3] }
    }
}

impl LookaheadConfig {
    /// Discount for terrain `hop` hops away (`hop >= 1`).
    #[inline]
    pub fn discount(&self, hop: u32) -> f32 {
        let i = (hop.max(1) - 1) as usize;
        self.discounts
            .get(i)
            .or_else(|| self.discounts.last())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn validate(&self) -> DecisionResult<()> {
        let in_range = self.discounts.iter().all(|&d| d > 0.0 && d <= 1.0);
        let decreasing = self.discounts.windows(2).all(|w| w[0] > w[1]);
        if self.discounts.is_empty() || !in_range || !decreasing {
            return Err(DecisionError::InvalidDiscounts(self.discounts.clone()));
        }
        Ok(())
    }
}

// ── DecisionConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionConfig {
    /// Softmax temperature.  Low is greedy, high is uniform.
    pub temperature:        f32,
    /// Floor applied to the temperature before dividing by it.
    pub min_temperature:    f32,
    /// Probability of ignoring scores and picking uniformly.
    pub chaos_probability:  f32,
    /// Lowest score a non-blocked candidate can receive.
    pub score_floor:        f32,
    /// Fixed score of a desperate-only candidate.
    pub desperate_score:    f32,
    /// Half-width of the personality offset range.  The simulation builder
    /// rejects agents built with a different spread.
    pub personality_spread: f32,
    pub weights:            DecisionWeights,
    pub lookahead:          LookaheadConfig,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            temperature:        0.3,
            min_temperature:    1e-3,
            chaos_probability:  0.05,
            score_floor:        0.01,
            desperate_score:    0.01,
            personality_spread: 0.15,
            weights:            DecisionWeights::default(),
            lookahead:          LookaheadConfig::default(),
        }
    }
}

impl DecisionConfig {
    /// Temperature actually used by softmax.
    #[inline]
    pub fn effective_temperature(&self) -> f32 {
        self.temperature.max(self.min_temperature)
    }

    pub fn validate(&self) -> DecisionResult<()> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(DecisionError::InvalidTemperature(self.temperature));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(DecisionError::InvalidTemperature(self.min_temperature));
        }
        if !(0.0..=1.0).contains(&self.chaos_probability) {
            return Err(DecisionError::InvalidProbability {
                name:  "chaos_probability",
                value: self.chaos_probability,
            });
        }
        if !(self.score_floor > 0.0 && self.desperate_score > 0.0) {
            return Err(DecisionError::Config(format!(
                "score_floor ({}) and desperate_score ({}) must be positive",
                self.score_floor, self.desperate_score
            )));
        }
        if !(0.0..1.0).contains(&self.personality_spread) {
            return Err(DecisionError::Config(format!(
                "personality_spread must be in [0, 1), got {}",
                self.personality_spread
            )));
        }
        self.weights.validate()?;
        self.lookahead.validate()
    }
}
