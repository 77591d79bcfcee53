//! Unit tests for piste-decision.
//!
//! Networks are built by hand; trails are laid out far apart (well beyond
//! the 15 m connection radius) except where a connection is intended.

#[cfg(test)]
mod helpers {
    use piste_core::{LiftId, TrailClass, TrailId, Vec3};
    use piste_network::{SkiNetwork, SkiNetworkBuilder};

    /// Trails joined end-to-start in a straight line, `classes[i]` for the
    /// i-th trail.
    pub fn chain(classes: &[TrailClass]) -> (SkiNetwork, Vec<TrailId>) {
        let mut b = SkiNetworkBuilder::new();
        let ids = classes
            .iter()
            .enumerate()
            .map(|(i, &class)| {
                let x0 = 100.0 * i as f32;
                let from = Vec3::new(x0, 1000.0 - 20.0 * i as f32, 0.0);
                let to = Vec3::new(x0 + 100.0, 1000.0 - 20.0 * (i + 1) as f32, 0.0);
                b.add_trail(class, vec![from, to], 30.0).unwrap()
            })
            .collect();
        (b.build(), ids)
    }

    /// Two dead-end trails leaving the same summit point:
    /// `a` (Green) and `b` (DoubleBlack).
    pub fn fork() -> (SkiNetwork, TrailId, TrailId) {
        let mut b = SkiNetworkBuilder::new();
        let s = Vec3::new(0.0, 500.0, 0.0);
        let a = b.add_trail(TrailClass::Green, vec![s, Vec3::new(-300.0, 300.0, 300.0)], 30.0).unwrap();
        let db = b.add_trail(TrailClass::DoubleBlack, vec![s, Vec3::new(300.0, 300.0, 300.0)], 30.0).unwrap();
        (b.build(), a, db)
    }

    /// Two lifts far apart: the top of `steep` serves only a DoubleBlack,
    /// the top of `easy` only a Green.
    pub fn two_lifts() -> (SkiNetwork, LiftId, LiftId) {
        let mut b = SkiNetworkBuilder::new();
        let steep = b.add_lift(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 300.0, 600.0), 20.0).unwrap();
        b.add_trail(
            TrailClass::DoubleBlack,
            vec![Vec3::new(0.0, 300.0, 600.0), Vec3::new(0.0, 50.0, 100.0)],
            20.0,
        )
        .unwrap();
        let easy = b.add_lift(Vec3::new(2000.0, 0.0, 0.0), Vec3::new(2000.0, 300.0, 600.0), 20.0).unwrap();
        b.add_trail(
            TrailClass::Green,
            vec![Vec3::new(2000.0, 300.0, 600.0), Vec3::new(2000.0, 50.0, 100.0)],
            20.0,
        )
        .unwrap();
        (b.build(), steep, easy)
    }
}

// ── Softmax & sampling ────────────────────────────────────────────────────────

#[cfg(test)]
mod softmax {
    use crate::{sample_index, softmax};

    #[test]
    fn worked_example_at_unit_temperature() {
        let p = softmax(&[1.0, 0.5], 1.0);
        assert!((p[0] - 0.622).abs() < 1e-3, "{p:?}");
        assert!((p[1] - 0.378).abs() < 1e-3, "{p:?}");
    }

    #[test]
    fn low_temperature_is_near_deterministic() {
        let p = softmax(&[1.0, 0.5], 0.1);
        // exp(-5) / (1 + exp(-5))
        assert!((p[1] - 0.006_69).abs() < 1e-4, "{p:?}");
        assert!(p[0] > 0.99);
        let p = softmax(&[1.0, 0.5], 0.05);
        assert!(p[0] > 0.9999, "{p:?}");
    }

    #[test]
    fn high_temperature_is_near_uniform() {
        let p = softmax(&[1.0, 0.5], 5.0);
        assert!((p[0] - 0.525).abs() < 1e-3, "{p:?}");
        assert!((p[1] - 0.475).abs() < 1e-3, "{p:?}");
    }

    #[test]
    fn distribution_sums_to_one() {
        let cases: [&[f32]; 4] = [&[0.01, 0.01], &[0.0, 3.0, 1.5, 0.2], &[100.0, 0.0], &[0.0, 0.0, 0.0]];
        for scores in cases {
            for t in [1e-3, 0.1, 0.3, 1.0, 10.0] {
                let p = softmax(scores, t);
                let sum: f32 = p.iter().sum();
                assert!((sum - 1.0).abs() < 1e-5, "{scores:?} T={t}: {p:?}");
                assert!(p.iter().all(|&x| (0.0..=1.0).contains(&x)));
            }
        }
    }

    #[test]
    fn tiny_temperature_does_not_overflow() {
        let p = softmax(&[50.0, 0.0], 1e-3);
        assert_eq!(p[0], 1.0);
        assert_eq!(p[1], 0.0);
    }

    #[test]
    fn empty_input() {
        assert!(softmax(&[], 1.0).is_empty());
        assert_eq!(sample_index(&[], 0.5), 0);
    }

    #[test]
    fn sampling_walks_cdf() {
        let p = [0.2, 0.3, 0.5];
        assert_eq!(sample_index(&p, 0.0), 0);
        assert_eq!(sample_index(&p, 0.19), 0);
        assert_eq!(sample_index(&p, 0.25), 1);
        assert_eq!(sample_index(&p, 0.99), 2);
        assert_eq!(sample_index(&p, 1.0), 2, "rounding slack lands on last");
        assert_eq!(sample_index(&[0.6, 0.4, 0.0], 1.0), 1, "never on a zero slot");
    }
}

// ── Preference table & config ─────────────────────────────────────────────────

#[cfg(test)]
mod preference {
    use piste_core::{SkillLevel, TrailClass};

    use crate::{traversal_willingness, DecisionConfig, LookaheadConfig, Preference, PreferenceTable};

    #[test]
    fn default_matrix() {
        let t = PreferenceTable::default();
        assert_eq!(t.get(SkillLevel::Beginner, TrailClass::Green), Preference::Allowed(1.0));
        assert_eq!(t.get(SkillLevel::Beginner, TrailClass::Blue), Preference::DesperateOnly);
        assert_eq!(t.get(SkillLevel::Beginner, TrailClass::DoubleBlack), Preference::Disallowed);
        assert_eq!(t.get(SkillLevel::Intermediate, TrailClass::DoubleBlack), Preference::Disallowed);
        assert_eq!(t.get(SkillLevel::Expert, TrailClass::DoubleBlack), Preference::Allowed(1.0));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn invalid_weight_rejected() {
        let mut t = PreferenceTable::default();
        t.set(SkillLevel::Expert, TrailClass::Green, Preference::Allowed(1.5));
        assert!(t.validate().is_err());
    }

    #[test]
    fn preference_ordering() {
        assert!(Preference::Allowed(0.1).beats(Preference::DesperateOnly));
        assert!(Preference::DesperateOnly.beats(Preference::Disallowed));
        assert!(Preference::Allowed(0.8).beats(Preference::Allowed(0.5)));
        assert!(!Preference::Allowed(0.5).beats(Preference::Allowed(0.5)));
    }

    #[test]
    fn traversal_willingness_shape() {
        use SkillLevel::*;
        use TrailClass::*;
        assert_eq!(traversal_willingness(Beginner, Black), 0.0, "two classes above");
        assert_eq!(traversal_willingness(Beginner, Blue), 0.1, "one class above");
        assert_eq!(traversal_willingness(Expert, Green), 0.85, "plateau");
        let by_gap: Vec<f32> = [DoubleBlack, Black, Blue, Green]
            .iter()
            .map(|&c| traversal_willingness(Expert, c))
            .collect();
        assert!(by_gap.windows(2).all(|w| w[0] < w[1]), "{by_gap:?}");
    }

    #[test]
    fn discounts_strictly_decrease() {
        let l = LookaheadConfig::default();
        assert!(l.discount(1) > l.discount(2));
        assert!(l.discount(2) > l.discount(3));
        assert!(l.discount(3) > l.discount(4));
        assert_eq!(l.discount(4), l.discount(9), "hops past the table reuse the last entry");
    }

    #[test]
    fn config_validation() {
        assert!(DecisionConfig::default().validate().is_ok());

        let mut c = DecisionConfig::default();
        c.temperature = 0.0;
        assert!(c.validate().is_err());

        let mut c = DecisionConfig::default();
        c.chaos_probability = 1.5;
        assert!(c.validate().is_err());

        let mut c = DecisionConfig::default();
        c.lookahead.discounts = vec![1.0, 1.0, 0.5];
        assert!(c.validate().is_err());

        let mut c = DecisionConfig::default();
        c.weights.herding = -1.0;
        assert!(c.validate().is_err());
    }
}

// ── score_factors ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod score {
    use piste_agent::{Factor, PersonalityOffsets};

    use crate::{score_factors, CandidateFactors, DecisionConfig, Preference};

    fn allowed(w: f32) -> CandidateFactors {
        CandidateFactors::neutral(Preference::Allowed(w))
    }

    #[test]
    fn hard_block_is_exactly_zero() {
        let mut f = CandidateFactors::neutral(Preference::Disallowed);
        f.goal_match = true;
        f.downstream = 1.0;
        assert_eq!(score_factors(&f, &PersonalityOffsets::NEUTRAL, &DecisionConfig::default()), 0.0);
    }

    #[test]
    fn desperate_only_is_constant() {
        let mut f = CandidateFactors::neutral(Preference::DesperateOnly);
        f.goal_match = true;
        let c = DecisionConfig::default();
        assert_eq!(score_factors(&f, &PersonalityOffsets::NEUTRAL, &c), c.desperate_score);
    }

    #[test]
    fn weighted_sum() {
        let c = DecisionConfig::default();
        let mut f = allowed(0.75);
        f.downstream = 0.5;
        f.novel = true;
        f.crowding = 0.2;
        // 1.0*0.75 + 0.6*0.5 + 0.3*1 - 0.5*0.2
        let s = score_factors(&f, &PersonalityOffsets::NEUTRAL, &c);
        assert!((s - 1.25).abs() < 1e-5, "{s}");
    }

    #[test]
    fn personality_perturbs_weights() {
        let c = DecisionConfig::default();
        let mut p = PersonalityOffsets::NEUTRAL;
        p.0[Factor::Preference as usize] = 0.1;
        let s = score_factors(&allowed(0.75), &p, &c);
        assert!((s - 0.825).abs() < 1e-5, "{s}");
    }

    #[test]
    fn heavy_penalties_hit_the_floor() {
        let c = DecisionConfig::default();
        let mut f = allowed(0.1);
        f.crowding = 50.0;
        f.herding = 1.0;
        assert_eq!(score_factors(&f, &PersonalityOffsets::NEUTRAL, &c), c.score_floor);
        f.crowding = f32::NAN;
        assert_eq!(score_factors(&f, &PersonalityOffsets::NEUTRAL, &c), c.score_floor);
    }

    #[test]
    fn never_between_zero_and_floor() {
        let c = DecisionConfig::default();
        let prefs = [Preference::Disallowed, Preference::DesperateOnly, Preference::Allowed(0.2), Preference::Allowed(1.0)];
        for access in prefs {
            for crowding in [0.0, 0.5, 3.0, 40.0] {
                for deficit in [-2.0, 0.0, 1.0] {
                    let mut f = CandidateFactors::neutral(access);
                    f.crowding = crowding;
                    f.deficit = deficit;
                    let s = score_factors(&f, &PersonalityOffsets::NEUTRAL, &c);
                    assert!(s == 0.0 || s >= c.score_floor, "{access:?} {crowding} {deficit} → {s}");
                    assert_eq!(s == 0.0, access.is_disallowed());
                }
            }
        }
    }
}

// ── Downstream lookahead ──────────────────────────────────────────────────────

#[cfg(test)]
mod downstream {
    use piste_core::{SkillLevel, TrailClass, Vec3};
    use piste_network::SkiNetworkBuilder;

    use super::helpers::{chain, two_lifts};
    use crate::{DownstreamEvaluator, LookaheadConfig, PreferenceTable};

    fn eval() -> DownstreamEvaluator {
        DownstreamEvaluator::new(LookaheadConfig::default())
    }

    #[test]
    fn value_discounted_by_hop() {
        use TrailClass::{Black, Green};
        let prefs = PreferenceTable::default();
        // Advanced: Green 0.25, Black 1.0.  A Black `k` hops past the root.
        let expected = [1.0, 0.7, 0.45, 0.3];
        for (k, want) in (1..=4).zip(expected) {
            let mut classes = vec![Green; k];
            classes.push(Black);
            let (net, ids) = chain(&classes);
            let v = eval().evaluate(SkillLevel::Advanced, ids[0], 4, &net, &prefs);
            assert!((v - want).abs() < 1e-6, "black at hop {k}: {v}");
        }
        // Five hops away is beyond the horizon: only the greens count.
        let (net, ids) = chain(&[Green, Green, Green, Green, Green, Black]);
        let v = eval().evaluate(SkillLevel::Advanced, ids[0], 4, &net, &prefs);
        assert!((v - 0.25).abs() < 1e-6, "{v}");
    }

    #[test]
    fn dead_end_is_zero() {
        let prefs = PreferenceTable::default();
        let (net, ids) = chain(&[TrailClass::Green, TrailClass::DoubleBlack]);
        let mut ev = eval();
        assert_eq!(ev.evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs), 0.0);
        assert!(ev.evaluate(SkillLevel::Expert, ids[0], 4, &net, &prefs) > 0.0);
        // Nothing at all after the last trail.
        assert_eq!(ev.evaluate(SkillLevel::Expert, ids[1], 4, &net, &prefs), 0.0);
    }

    #[test]
    fn disallowed_terrain_is_not_walked_through() {
        use TrailClass::{DoubleBlack, Green};
        let prefs = PreferenceTable::default();
        let (net, ids) = chain(&[Green, DoubleBlack, Green]);
        assert_eq!(eval().evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs), 0.0);
    }

    #[test]
    fn desperate_terrain_is_reachable() {
        use TrailClass::{Blue, Green};
        let prefs = PreferenceTable::default();
        // Beginner: Blue is desperate-only, the Green after it is fine.
        let (net, ids) = chain(&[Green, Blue, Green]);
        let v = eval().evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs);
        assert!((v - 0.7).abs() < 1e-6, "{v}");
    }

    #[test]
    fn zero_hops() {
        let prefs = PreferenceTable::default();
        let (net, ids) = chain(&[TrailClass::Green, TrailClass::Green]);
        assert_eq!(eval().evaluate(SkillLevel::Beginner, ids[0], 0, &net, &prefs), 0.0);
    }

    #[test]
    fn cycles_terminate() {
        let prefs = PreferenceTable::default();
        let mut b = SkiNetworkBuilder::new();
        let (p, q) = (Vec3::new(0.0, 100.0, 0.0), Vec3::new(0.0, 0.0, 200.0));
        let down = b.add_trail(TrailClass::Green, vec![p, q], 20.0).unwrap();
        // A lift and a second trail both lead back to the start.
        b.add_lift(q, p, 10.0).unwrap();
        let back = b.add_trail(TrailClass::Blue, vec![q, Vec3::new(0.0, 50.0, 100.0), p], 20.0).unwrap();
        let net = b.build();
        assert!(net.trails_after_trail(back).any(|t| t == down));

        let v = eval().evaluate(SkillLevel::Intermediate, down, 4, &net, &prefs);
        // Blue (1.0) is directly reachable at hop 1.
        assert!((v - 1.0).abs() < 1e-6, "{v}");
        let v = eval().evaluate(SkillLevel::Beginner, down, 16, &net, &prefs);
        assert!(v > 0.0);
    }

    #[test]
    fn repeated_calls_hit_cache() {
        let prefs = PreferenceTable::default();
        let (net, ids) = chain(&[TrailClass::Green, TrailClass::Blue, TrailClass::Black]);
        let mut ev = eval();
        let a = ev.evaluate(SkillLevel::Intermediate, ids[0], 4, &net, &prefs);
        assert_eq!(ev.cached_entries(), 1);
        let b = ev.evaluate(SkillLevel::Intermediate, ids[0], 4, &net, &prefs);
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(ev.cached_entries(), 1);
    }

    #[test]
    fn invalidate_picks_up_topology_change() {
        let prefs = PreferenceTable::default();
        let (mut net, ids) = chain(&[TrailClass::Green, TrailClass::Green]);
        let mut ev = eval();
        assert_eq!(ev.evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs), 1.0);

        net.invalidate_trail(ids[1]);
        // Stale until invalidated.
        assert_eq!(ev.evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs), 1.0);
        ev.invalidate();
        assert_eq!(ev.cached_entries(), 0);
        assert_eq!(ev.evaluate(SkillLevel::Beginner, ids[0], 4, &net, &prefs), 0.0);
    }

    #[test]
    fn lift_lookahead_starts_at_top() {
        let prefs = PreferenceTable::default();
        let (net, steep, easy) = two_lifts();
        let mut ev = eval();
        assert_eq!(ev.evaluate_lift(SkillLevel::Beginner, steep, 4, &net, &prefs), 0.0);
        assert_eq!(ev.evaluate_lift(SkillLevel::Beginner, easy, 4, &net, &prefs), 1.0);
    }
}

// ── DecisionEngine ────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use piste_agent::{AgentContext, Goal, GoalStep};
    use piste_core::{AgentId, AgentRng, SkillLevel, TrailClass};
    use piste_traffic::TrafficState;

    use super::helpers::{fork, two_lifts};
    use crate::{Candidate, DecisionConfig, DecisionEngine, Preference, PreferenceTable};

    fn ctx(skill: SkillLevel) -> AgentContext {
        // Zero spread: weights exactly as configured.
        AgentContext::new(AgentId(0), skill, 0.0)
    }

    fn engine_with(config: DecisionConfig) -> DecisionEngine {
        DecisionEngine::new(config, PreferenceTable::default()).unwrap()
    }

    fn no_chaos() -> DecisionConfig {
        DecisionConfig { chaos_probability: 0.0, ..DecisionConfig::default() }
    }

    #[test]
    fn rejects_invalid_config() {
        let bad = DecisionConfig { temperature: -1.0, ..DecisionConfig::default() };
        assert!(DecisionEngine::new(bad, PreferenceTable::default()).is_err());
    }

    #[test]
    fn empty_and_single_candidate() {
        let (net, a, _) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let mut rng = AgentRng::new(1, AgentId(0));
        let c = ctx(SkillLevel::Beginner);
        assert_eq!(e.choose(&[], &c, &net, &traffic, &mut rng), None);
        let only = [Candidate::Trail(a)];
        assert_eq!(e.choose(&only, &c, &net, &traffic, &mut rng), Some(only[0]));
        assert_eq!(e.downstream().cached_entries(), 0, "single candidate is not scored");
    }

    #[test]
    fn trail_score_from_factors() {
        let (net, a, db) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Beginner);
        // pref 1.0 + novelty 0.3 + traversal 0.3 * 0.3; dead end, no traffic.
        let s = e.score(Candidate::Trail(a), &c, &net, &traffic);
        assert!((s - 1.39).abs() < 1e-5, "{s}");
        assert_eq!(e.score(Candidate::Trail(db), &c, &net, &traffic), 0.0);
    }

    #[test]
    fn hard_blocked_double_black_is_suppressed() {
        let (net, a, db) = fork();
        let mut prefs = PreferenceTable::default();
        prefs.set(SkillLevel::Intermediate, TrailClass::Green, Preference::Allowed(0.75));
        let c = ctx(SkillLevel::Intermediate);
        let traffic = TrafficState::default();
        let cands = [Candidate::Trail(a), Candidate::Trail(db)];

        let mut e = DecisionEngine::new(no_chaos(), prefs.clone()).unwrap();
        let p = e.probabilities(&cands, &c, &net, &traffic);
        assert_eq!(p, vec![1.0, 0.0]);

        let cold = DecisionConfig { temperature: 0.05, ..no_chaos() };
        let mut e = DecisionEngine::new(cold, prefs).unwrap();
        let p = e.probabilities(&cands, &c, &net, &traffic);
        assert_eq!(p[1], 0.0);

        let mut rng = AgentRng::new(7, AgentId(0));
        for _ in 0..200 {
            assert_eq!(e.choose(&cands, &c, &net, &traffic, &mut rng), Some(cands[0]));
        }
    }

    #[test]
    fn hard_block_holds_when_open_trail_is_floored() {
        let (net, a, db) = fork();
        let mut traffic = TrafficState::default();
        traffic.register_trail(a, 2.0);
        for i in 1..=8 {
            traffic.on_trail_entered(AgentId(i), a);
        }
        let mut e = engine_with(no_chaos());
        let c = ctx(SkillLevel::Beginner);
        let cands = [Candidate::Trail(a), Candidate::Trail(db)];

        let floor = e.config().score_floor;
        assert_eq!(e.score(cands[0], &c, &net, &traffic), floor);
        assert_eq!(e.score(cands[1], &c, &net, &traffic), 0.0);

        let p = e.probabilities(&cands, &c, &net, &traffic);
        assert_eq!(p, vec![1.0, 0.0]);

        let mut rng = AgentRng::new(11, AgentId(0));
        let blocked = (0..10_000)
            .filter(|_| e.choose(&cands, &c, &net, &traffic, &mut rng) == Some(cands[1]))
            .count();
        assert_eq!(blocked, 0);
    }

    #[test]
    fn all_blocked_stays_uniform() {
        let (net, steep, _) = two_lifts();
        let (fork_net, _, db) = fork();
        let mut e = engine_with(no_chaos());
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Beginner);

        let lifts = [Candidate::Lift(steep), Candidate::Lift(piste_core::LiftId(99))];
        assert_eq!(e.probabilities(&lifts, &c, &net, &traffic), vec![0.5, 0.5]);

        let mut rng = AgentRng::new(2, AgentId(0));
        let cands = [Candidate::Trail(db), Candidate::Trail(piste_core::TrailId(42))];
        let picks = (0..1_000)
            .filter(|_| e.choose(&cands, &c, &fork_net, &traffic, &mut rng) == Some(cands[0]))
            .count();
        assert!((300..700).contains(&picks), "{picks}");
    }

    #[test]
    fn chaos_skips_hard_blocked() {
        let (net, a, db) = fork();
        let all_chaos = DecisionConfig { chaos_probability: 1.0, ..DecisionConfig::default() };
        let mut e = engine_with(all_chaos);
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Beginner);
        let cands = [Candidate::Trail(db), Candidate::Trail(a)];
        let mut rng = AgentRng::new(3, AgentId(0));
        for _ in 0..100 {
            assert_eq!(e.choose(&cands, &c, &net, &traffic, &mut rng), Some(Candidate::Trail(a)));
        }
    }

    #[test]
    fn goal_step_raises_score() {
        let (net, a, _) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let mut c = ctx(SkillLevel::Beginner);
        let before = e.score(Candidate::Trail(a), &c, &net, &traffic);
        c.goal = Some(Goal::new(vec![GoalStep::SkiTrail(a)], Some(a)));
        let after = e.score(Candidate::Trail(a), &c, &net, &traffic);
        assert!((after - before - 1.5).abs() < 1e-5);
    }

    #[test]
    fn visited_edge_loses_novelty() {
        let (net, a, _) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let mut c = ctx(SkillLevel::Beginner);
        let fresh = e.score(Candidate::Trail(a), &c, &net, &traffic);
        c.enter_trail(a);
        let seen = e.score(Candidate::Trail(a), &c, &net, &traffic);
        assert!((fresh - seen - 0.3).abs() < 1e-5);
    }

    #[test]
    fn intents_and_occupancy_lower_score() {
        let (net, a, _) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let mut traffic = TrafficState::default();
        traffic.register_network(&net);
        let c = ctx(SkillLevel::Beginner);

        let base = e.score(Candidate::Trail(a), &c, &net, &traffic);
        traffic.on_trail_intended(AgentId(1), a);
        traffic.on_trail_intended(AgentId(2), a);
        let herded = e.score(Candidate::Trail(a), &c, &net, &traffic);
        assert!(herded < base);

        traffic.on_trail_entered(AgentId(1), a);
        let crowded = e.score(Candidate::Trail(a), &c, &net, &traffic);
        assert!(crowded < herded);
    }

    #[test]
    fn lift_gated_by_trails_at_top() {
        let (net, steep, easy) = two_lifts();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Beginner);
        assert_eq!(e.score(Candidate::Lift(steep), &c, &net, &traffic), 0.0);
        assert!(e.score(Candidate::Lift(easy), &c, &net, &traffic) > 1.0);
        assert!(e.access(Candidate::Lift(steep), SkillLevel::Expert, &net) == Preference::Allowed(1.0));
    }

    #[test]
    fn unknown_edges_score_zero() {
        let (mut net, a, _) = fork();
        let mut e = engine_with(DecisionConfig::default());
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Beginner);
        net.invalidate_trail(a);
        assert_eq!(e.score(Candidate::Trail(a), &c, &net, &traffic), 0.0);
        assert_eq!(e.score(Candidate::Lift(piste_core::LiftId(99)), &c, &net, &traffic), 0.0);
    }

    #[test]
    fn same_seed_same_choices() {
        let (net, a, db) = fork();
        let cands = [Candidate::Trail(a), Candidate::Trail(db)];
        let traffic = TrafficState::default();
        let c = ctx(SkillLevel::Expert);
        let run = || {
            let mut e = engine_with(DecisionConfig::default());
            let mut rng = AgentRng::new(99, AgentId(4));
            (0..50).map(|_| e.choose(&cands, &c, &net, &traffic, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn switch_choice_follows_scores() {
        let e = engine_with(DecisionConfig { temperature: 0.05, ..DecisionConfig::default() });
        let mut rng = AgentRng::new(5, AgentId(0));
        let switches = (0..200).filter(|_| e.choose_switch(0.2, 2.0, &mut rng)).count();
        assert_eq!(switches, 200);
        let stays = (0..200).filter(|_| !e.choose_switch(2.0, 0.2, &mut rng)).count();
        assert_eq!(stays, 200);
    }
}
