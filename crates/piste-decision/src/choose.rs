//! Softmax selection and the `DecisionEngine` that ties scoring together.

use piste_agent::{AgentContext, GoalStep};
use piste_core::{AgentRng, LiftId, SkillLevel, TrailClass};
use piste_network::SkiNetwork;
use piste_traffic::TrafficState;

use crate::{
    score_factors, traversal_willingness, Candidate, CandidateFactors, DecisionConfig, DecisionResult,
    DownstreamEvaluator, Preference, PreferenceTable,
};

// ── Softmax ───────────────────────────────────────────────────────────────────

/// Softmax over `scores` at `temperature`.
///
/// The maximum score is subtracted before exponentiation so large scores or
/// tiny temperatures cannot overflow.  `temperature` must already be
/// floored by the caller (see [`DecisionConfig::effective_temperature`]).
/// Returns an empty vector for empty input.
pub fn softmax(scores: &[f32], temperature: f32) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| ((s - max) / temperature).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        exps.iter().map(|e| e / sum).collect()
    } else {
        vec![1.0 / scores.len() as f32; scores.len()]
    }
}

/// Walk the cumulative distribution of `probs` with one uniform draw
/// `u ∈ [0, 1)`.  Rounding slack at the top end lands on the last index
/// with a non-zero probability.
pub fn sample_index(probs: &[f32], u: f32) -> usize {
    let mut acc = 0.0_f32;
    for (i, p) in probs.iter().enumerate() {
        acc += p;
        if u < acc {
            return i;
        }
    }
    // Rounding left `u` past the total: last slot that can be drawn.
    probs
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probs.len().saturating_sub(1))
}

// ── DecisionEngine ────────────────────────────────────────────────────────────

/// Scoring and selection shared by every routing decision, trail or lift.
///
/// Owns the preference table and the downstream cache.  Holds no traffic
/// state and fires no events; the caller records the intent for whatever
/// [`choose`](Self::choose) returns.
pub struct DecisionEngine {
    config:     DecisionConfig,
    prefs:      PreferenceTable,
    downstream: DownstreamEvaluator,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig, prefs: PreferenceTable) -> DecisionResult<Self> {
        config.validate()?;
        prefs.validate()?;
        let downstream = DownstreamEvaluator::new(config.lookahead.clone());
        Ok(Self { config, prefs, downstream })
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn preferences(&self) -> &PreferenceTable {
        &self.prefs
    }

    pub fn downstream(&self) -> &DownstreamEvaluator {
        &self.downstream
    }

    /// Forget all cached lookahead values.  Call after any topology change.
    pub fn invalidate_downstream(&mut self) {
        self.downstream.invalidate();
    }

    /// Best preference among the trails at the top of `lift`, with that
    /// trail's class.  `None` if the lift is gone or has no trails.
    pub fn lift_access(&self, skill: SkillLevel, lift: LiftId, network: &SkiNetwork) -> Option<(Preference, TrailClass)> {
        network.lift(lift)?;
        network
            .trails_from_lift(lift)
            .filter_map(|t| network.trail(t))
            .map(|t| (self.prefs.get(skill, t.class), t.class))
            .reduce(|best, cur| if cur.0.beats(best.0) { cur } else { best })
    }

    /// Skill gate for `candidate` without computing any other factor.
    /// Unknown or invalid edges are treated as blocked.
    pub fn access(&self, candidate: Candidate, skill: SkillLevel, network: &SkiNetwork) -> Preference {
        match candidate {
            Candidate::Trail(t) => network
                .trail(t)
                .map_or(Preference::Disallowed, |t| self.prefs.get(skill, t.class)),
            Candidate::Lift(l) => self
                .lift_access(skill, l, network)
                .map_or(Preference::Disallowed, |(p, _)| p),
        }
    }

    /// Gather every scoring factor of `candidate` for `ctx`.  `None` for
    /// unknown or invalid edges.
    pub fn factors(
        &mut self,
        candidate: Candidate,
        ctx:       &AgentContext,
        network:   &SkiNetwork,
        traffic:   &TrafficState,
    ) -> Option<CandidateFactors> {
        let depth = self.config.lookahead.max_depth;
        match candidate {
            Candidate::Trail(id) => {
                let trail = network.trail(id)?;
                let access = self.prefs.get(ctx.skill, trail.class);
                if access.is_disallowed() {
                    return Some(CandidateFactors::neutral(access));
                }
                Some(CandidateFactors {
                    access,
                    downstream: self.downstream.evaluate(ctx.skill, id, depth, network, &self.prefs),
                    deficit:    traffic.trail_deficit(id),
                    goal_match: ctx.goal_step() == Some(GoalStep::SkiTrail(id)),
                    novel:      !ctx.visited.has_skied(id),
                    crowding:   traffic.trail_crowding(id),
                    traversal:  traversal_willingness(ctx.skill, trail.class),
                    herding:    traffic.trail_recent_popularity(id),
                })
            }
            Candidate::Lift(id) => {
                network.lift(id)?;
                let Some((access, class)) = self.lift_access(ctx.skill, id, network) else {
                    return Some(CandidateFactors::neutral(Preference::Disallowed));
                };
                if access.is_disallowed() {
                    return Some(CandidateFactors::neutral(access));
                }
                Some(CandidateFactors {
                    access,
                    downstream: self.downstream.evaluate_lift(ctx.skill, id, depth, network, &self.prefs),
                    deficit:    traffic.lift_deficit(id),
                    goal_match: ctx.goal_step() == Some(GoalStep::RideLift(id)),
                    novel:      !ctx.visited.has_ridden(id),
                    crowding:   traffic.lift_crowding(id),
                    traversal:  traversal_willingness(ctx.skill, class),
                    herding:    traffic.lift_recent_popularity(id),
                })
            }
        }
    }

    /// Score of `candidate` for `ctx`: exactly 0 when hard-blocked (or
    /// unknown), otherwise at least the configured floor.
    pub fn score(
        &mut self,
        candidate: Candidate,
        ctx:       &AgentContext,
        network:   &SkiNetwork,
        traffic:   &TrafficState,
    ) -> f32 {
        match self.factors(candidate, ctx, network, traffic) {
            Some(f) => score_factors(&f, &ctx.personality, &self.config),
            None => 0.0,
        }
    }

    /// Selection probabilities over `candidates`, in the same order.
    ///
    /// Hard-blocked candidates get exactly 0 while any other candidate is
    /// open; the softmax runs over the open ones only.  When every candidate
    /// is blocked the softmax covers all of them (uniform).
    pub fn probabilities(
        &mut self,
        candidates: &[Candidate],
        ctx:        &AgentContext,
        network:    &SkiNetwork,
        traffic:    &TrafficState,
    ) -> Vec<f32> {
        let open: Vec<bool> = candidates
            .iter()
            .map(|&c| !self.access(c, ctx.skill, network).is_disallowed())
            .collect();
        let scores: Vec<f32> = candidates
            .iter()
            .map(|&c| self.score(c, ctx, network, traffic))
            .collect();
        let temperature = self.config.effective_temperature();

        if !open.contains(&true) {
            return softmax(&scores, temperature);
        }

        let open_scores: Vec<f32> = scores
            .iter()
            .zip(&open)
            .filter_map(|(&s, &is_open)| is_open.then_some(s))
            .collect();
        let mut open_probs = softmax(&open_scores, temperature).into_iter();
        open.iter()
            .map(|&is_open| if is_open { open_probs.next().unwrap_or(0.0) } else { 0.0 })
            .collect()
    }

    /// Pick one of `candidates` for `ctx`.
    ///
    /// * no candidates → `None`; the caller falls back.
    /// * one candidate → returned without scoring.
    /// * with probability `chaos_probability`, a uniform pick among the
    ///   candidates that are not hard-blocked (all of them if every one is).
    /// * otherwise softmax over the scores at the configured temperature,
    ///   with hard-blocked candidates left out (see [`probabilities`]).
    ///
    /// [`probabilities`]: Self::probabilities
    pub fn choose(
        &mut self,
        candidates: &[Candidate],
        ctx:        &AgentContext,
        network:    &SkiNetwork,
        traffic:    &TrafficState,
        rng:        &mut AgentRng,
    ) -> Option<Candidate> {
        match candidates {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }

        if rng.gen_bool(self.config.chaos_probability as f64) {
            let open: Vec<Candidate> = candidates
                .iter()
                .copied()
                .filter(|&c| !self.access(c, ctx.skill, network).is_disallowed())
                .collect();
            let pool = if open.is_empty() { candidates } else { &open[..] };
            let pick = rng.choose(pool).copied();
            log::debug!("{} wildcard pick {:?} of {}", ctx.id, pick, candidates.len());
            return pick;
        }

        let probs = self.probabilities(candidates, ctx, network, traffic);
        let u: f32 = rng.random();
        let chosen = candidates[sample_index(&probs, u)];
        log::debug!("{} chose {chosen} of {} candidates", ctx.id, candidates.len());
        Some(chosen)
    }

    /// Two-way softmax between staying (`stay_score`) and switching
    /// (`switch_score`).  Returns `true` to switch.
    pub fn choose_switch(&self, stay_score: f32, switch_score: f32, rng: &mut AgentRng) -> bool {
        let probs = softmax(&[stay_score, switch_score], self.config.effective_temperature());
        let u: f32 = rng.random();
        sample_index(&probs, u) == 1
    }
}
