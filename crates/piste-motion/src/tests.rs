//! Unit tests for piste-motion.

#[cfg(test)]
mod helpers {
    use piste_core::{LiftId, LodgeId, TrailClass, TrailId, Vec3};
    use piste_network::{SkiNetwork, SkiNetworkBuilder};

    pub const BASE: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const TOP: Vec3 = Vec3::new(0.0, 100.0, 400.0);
    pub const FLAT_START: Vec3 = Vec3::new(1000.0, 0.0, 0.0);

    pub struct Hill {
        pub net:   SkiNetwork,
        pub lift:  LiftId,
        /// TOP → BASE, 30 m wide, ~14° downhill.
        pub steep: TrailId,
        /// 200 m flat, 20 m wide, far from everything else.
        pub flat:  TrailId,
        pub lodge: LodgeId,
    }

    pub fn hill() -> Hill {
        let mut b = SkiNetworkBuilder::new();
        let lift = b.add_lift(BASE, TOP, 20.0).unwrap();
        let steep = b.add_trail(TrailClass::Blue, vec![TOP, BASE], 30.0).unwrap();
        let flat = b
            .add_trail(TrailClass::Green, vec![FLAT_START, Vec3::new(1000.0, 0.0, 200.0)], 20.0)
            .unwrap();
        let lodge = b.add_lodge(Vec3::new(50.0, 0.0, 0.0));
        Hill { net: b.build(), lift, steep, flat, lodge }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{MotionConfig, MotionError};

    #[test]
    fn defaults_validate() {
        let c = MotionConfig::default();
        c.validate().unwrap();
        assert!((c.max_speed() - 18.0).abs() < 1e-6);
    }

    #[test]
    fn slope_band() {
        let c = MotionConfig::default();
        assert!((c.slope_multiplier(0.0) - 0.6).abs() < 1e-6);
        assert!((c.slope_multiplier(35f32.to_radians()) - 1.8).abs() < 1e-4);
        assert!((c.slope_multiplier(17.5f32.to_radians()) - 1.2).abs() < 1e-4);
        // Beyond the band the multiplier stays at the top.
        assert!((c.slope_multiplier(70f32.to_radians()) - 1.8).abs() < 1e-6);
    }

    #[test]
    fn rejects_zero_walk_speed() {
        let c = MotionConfig { walk_speed: 0.0, ..MotionConfig::default() };
        assert!(matches!(c.validate(), Err(MotionError::InvalidSpeed { name: "walk_speed", .. })));
    }

    #[test]
    fn rejects_safety_factor_below_fastest_phase() {
        // 9 m/s * 1.8 on the steepest slope outruns a 1× cap.
        let c = MotionConfig { safety_factor: 1.0, ..MotionConfig::default() };
        assert!(matches!(c.validate(), Err(MotionError::Config(_))));
    }

    #[test]
    fn rejects_width_fraction_above_one() {
        let mut c = MotionConfig::default();
        c.lateral.width_fraction = 1.5;
        assert!(c.validate().is_err());
    }
}

// ── Lateral drift ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod lateral {
    use piste_core::AgentId;

    use crate::lateral::{drift_target, step_offset};
    use crate::LateralConfig;

    #[test]
    fn drift_is_bounded_and_repeatable() {
        for i in 0..2000 {
            let d = i as f32 * 0.73;
            let v = drift_target(AgentId(7), d, 60.0);
            assert!((-1.0..=1.0).contains(&v), "drift {v} at {d}");
            assert_eq!(v, drift_target(AgentId(7), d, 60.0));
        }
    }

    #[test]
    fn drift_is_smooth() {
        let mut prev = drift_target(AgentId(3), 0.0, 60.0);
        for i in 1..5000 {
            let v = drift_target(AgentId(3), i as f32 * 0.1, 60.0);
            assert!((v - prev).abs() < 0.01, "jump {prev} → {v}");
            prev = v;
        }
    }

    #[test]
    fn agents_drift_differently() {
        let differs = (0..50).any(|i| {
            let d = i as f32 * 10.0;
            (drift_target(AgentId(1), d, 60.0) - drift_target(AgentId(2), d, 60.0)).abs() > 1e-3
        });
        assert!(differs);
    }

    #[test]
    fn step_is_rate_limited() {
        let cfg = LateralConfig::default();
        let next = step_offset(0.0, 1.0, 15.0, &cfg, 0.5);
        assert!((next - 0.4).abs() < 1e-6);
    }

    #[test]
    fn step_hard_clamps_to_width_fraction() {
        let cfg = LateralConfig::default();
        // Coming from a wider trail: the old offset is outside the new band.
        let next = step_offset(10.0, 1.0, 5.0, &cfg, 0.5);
        assert!((next - 0.85 * 5.0).abs() < 1e-6);
        let next = step_offset(-10.0, -1.0, 5.0, &cfg, 0.5);
        assert!((next + 0.85 * 5.0).abs() < 1e-6);
    }
}

// ── Phases ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod phases {
    use piste_core::{AgentId, Vec3};

    use super::helpers::{hill, BASE, TOP};
    use crate::{advance, Completion, MotionConfig, MotionError, MotionState, Phase};

    const A: AgentId = AgentId(0);

    fn run_until_complete(state: &mut MotionState, h: &super::helpers::Hill, dt: f32) -> (Completion, usize) {
        let cfg = MotionConfig::default();
        for tick in 1..=10_000 {
            let c = advance(state, A, &h.net, &cfg, dt);
            if !c.is_none() {
                return (c, tick);
            }
        }
        panic!("no completion within 10000 ticks");
    }

    #[test]
    fn walk_reaches_lift_bottom() {
        let h = hill();
        let mut s = MotionState::idle_at(Vec3::new(10.0, 0.0, 0.0));
        s.walk_to_lift(h.lift, &h.net).unwrap();
        assert_eq!(s.heading, Vec3::new(-1.0, 0.0, 0.0));
        let (c, ticks) = run_until_complete(&mut s, &h, 0.5);
        assert_eq!(c, Completion::ReachedLift(h.lift));
        // 0.7 m per tick; 9.8 m leaves 0.2 m, inside the arrival tolerance.
        assert_eq!(ticks, 14);
        assert!(matches!(s.phase, Phase::WalkingToLift { .. }));
    }

    #[test]
    fn phase_entry_rejects_unknown_edges() {
        let h = hill();
        let mut s = MotionState::idle_at(BASE);
        let err = s.walk_to_lift(piste_core::LiftId(99), &h.net).unwrap_err();
        assert!(matches!(err, MotionError::UnknownLift(_)));
        let err = s.start_trail(piste_core::TrailId(99), &h.net).unwrap_err();
        assert!(matches!(err, MotionError::UnknownTrail(_)));
        assert!(matches!(s.phase, Phase::Idle { .. }));
    }

    #[test]
    fn ride_reaches_top() {
        let h = hill();
        let mut s = MotionState::idle_at(BASE);
        s.board_lift(h.lift, &h.net).unwrap();
        let (c, ticks) = run_until_complete(&mut s, &h, 1.0);
        assert_eq!(c, Completion::LiftTop(h.lift));
        let length = BASE.distance(TOP);
        assert_eq!(ticks, (length / 5.0).ceil() as usize);
        assert!(s.position.distance(TOP) < 1e-3);
        assert_eq!(s.phase, Phase::RidingLift { lift: h.lift, fraction: 1.0 });
        assert!((s.heading.dot((TOP - BASE).normalized()) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn steep_trail_is_faster_than_flat() {
        let h = hill();
        let cfg = MotionConfig::default();

        let mut steep = MotionState::idle_at(TOP);
        steep.start_trail(h.steep, &h.net).unwrap();
        advance(&mut steep, A, &h.net, &cfg, 0.5);

        let mut flat = MotionState::idle_at(super::helpers::FLAT_START);
        flat.start_trail(h.flat, &h.net).unwrap();
        advance(&mut flat, A, &h.net, &cfg, 0.5);

        let Phase::SkiingTrail { progress: p_steep, .. } = steep.phase else { panic!("not skiing") };
        let Phase::SkiingTrail { progress: p_flat, .. } = flat.phase else { panic!("not skiing") };
        assert!((p_flat - 0.5 * 9.0 * 0.6).abs() < 1e-4);
        let slope = 100f32.atan2(400.0);
        assert!((p_steep - 0.5 * 9.0 * cfg.slope_multiplier(slope)).abs() < 1e-4);
        assert!(p_steep > p_flat);
    }

    #[test]
    fn trail_end_clamps_progress() {
        let h = hill();
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        let (c, _) = run_until_complete(&mut s, &h, 0.5);
        assert_eq!(c, Completion::TrailEnd(h.steep));
        let length = h.net.trail(h.steep).unwrap().length;
        assert_eq!(s.phase, Phase::SkiingTrail { trail: h.steep, progress: length });
    }

    #[test]
    fn progress_stays_within_trail() {
        let h = hill();
        let cfg = MotionConfig::default();
        let length = h.net.trail(h.steep).unwrap().length;
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        for _ in 0..200 {
            advance(&mut s, A, &h.net, &cfg, 0.5);
            let Phase::SkiingTrail { progress, .. } = s.phase else { panic!("not skiing") };
            assert!((0.0..=length).contains(&progress));
        }
    }

    #[test]
    fn heading_follows_tangent() {
        let h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        advance(&mut s, A, &h.net, &cfg, 0.5);
        let tangent = (BASE - TOP).normalized();
        assert!((s.heading.dot(tangent) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn lateral_offset_stays_inside_band() {
        let h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        for _ in 0..100 {
            advance(&mut s, AgentId(5), &h.net, &cfg, 0.5);
            assert!(s.lateral_offset.abs() <= 0.85 * 15.0 + 1e-5);
        }
    }

    #[test]
    fn invalidated_edge_is_lost() {
        let mut h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        assert!(advance(&mut s, A, &h.net, &cfg, 0.5).is_none());
        let before = s.phase;
        h.net.invalidate_trail(h.steep);
        assert_eq!(advance(&mut s, A, &h.net, &cfg, 0.5), Completion::EdgeLost);
        assert_eq!(s.phase, before);
    }

    #[test]
    fn lodge_walk_and_rest() {
        let h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(Vec3::new(50.0, 0.0, 10.0));
        s.walk_to_lodge(h.lodge, &h.net).unwrap();
        let (c, _) = run_until_complete(&mut s, &h, 0.5);
        assert_eq!(c, Completion::ReachedLodge(h.lodge));

        s.rest(h.lodge, 2.0);
        for _ in 0..3 {
            assert!(advance(&mut s, A, &h.net, &cfg, 0.5).is_none());
        }
        assert_eq!(advance(&mut s, A, &h.net, &cfg, 0.5), Completion::Rested(h.lodge));
    }

    #[test]
    fn idle_waits_for_retry() {
        let h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(BASE);
        s.idle(1.0);
        assert!(advance(&mut s, A, &h.net, &cfg, 0.5).is_none());
        assert_eq!(advance(&mut s, A, &h.net, &cfg, 0.5), Completion::Ready);
    }
}

// ── Anti-teleport ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracking {
    use piste_core::{AgentId, Vec3};

    use super::helpers::{hill, BASE, FLAT_START};
    use crate::{advance, MotionConfig, MotionState};

    #[test]
    fn track_towards_never_overshoots() {
        let mut s = MotionState::idle_at(Vec3::ZERO);
        let moved = s.track_towards(Vec3::new(100.0, 0.0, 0.0), 9.0);
        assert!((moved - 9.0).abs() < 1e-5);
        let moved = s.track_towards(Vec3::new(10.0, 0.0, 0.0), 9.0);
        assert!((moved - 1.0).abs() < 1e-5);
        assert_eq!(s.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn discontinuous_target_is_bounded_per_tick() {
        // Start a trail 1 km away: the phase logic jumps, the tracked
        // position may not.
        let h = hill();
        let cfg = MotionConfig::default();
        let dt = 0.5;
        let bound = cfg.max_speed() * dt + 1e-3;
        let mut s = MotionState::idle_at(BASE);
        s.start_trail(h.flat, &h.net).unwrap();
        for _ in 0..300 {
            let before = s.position;
            advance(&mut s, AgentId(1), &h.net, &cfg, dt);
            assert!(before.distance(s.position) <= bound, "jumped {}", before.distance(s.position));
        }
        // Eventually the tracked position catches up with the trail.
        let end = h.net.trail(h.flat).unwrap().end();
        assert!(s.position.distance(end) < 20.0);
        assert!(FLAT_START.distance(s.position) > 100.0);
    }

    #[test]
    fn every_phase_respects_the_cap() {
        let h = hill();
        let cfg = MotionConfig::default();
        let dt = 1.0;
        let bound = cfg.max_speed() * dt + 1e-3;
        let mut s = MotionState::idle_at(Vec3::new(-300.0, 0.0, -300.0));
        s.board_lift(h.lift, &h.net).unwrap();
        for _ in 0..120 {
            let before = s.position;
            advance(&mut s, AgentId(2), &h.net, &cfg, dt);
            assert!(before.distance(s.position) <= bound);
        }
    }
}

// ── Exit sets ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod exit_sets {
    use piste_core::{AgentId, LiftId, TrailId};

    use super::helpers::{hill, TOP};
    use crate::{advance, MotionConfig, MotionState};

    #[test]
    fn cleared_on_transition_only() {
        let h = hill();
        let cfg = MotionConfig::default();
        let mut s = MotionState::idle_at(TOP);
        s.start_trail(h.steep, &h.net).unwrap();
        s.checked_lifts.insert(LiftId(0));
        s.checked_trails.insert(TrailId(1));

        for _ in 0..5 {
            advance(&mut s, AgentId(0), &h.net, &cfg, 0.5);
        }
        assert_eq!(s.checked_lifts.len(), 1);
        assert_eq!(s.checked_trails.len(), 1);
        assert!((s.since_exit_scan - 2.5).abs() < 1e-5);

        s.start_trail(h.flat, &h.net).unwrap();
        assert!(s.checked_lifts.is_empty());
        assert!(s.checked_trails.is_empty());
        assert_eq!(s.since_exit_scan, 0.0);
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use piste_core::AgentId;

    use super::helpers::{hill, TOP};
    use crate::{Completion, MotionConfig, MotionStore};

    #[test]
    fn fresh_store_asks_for_placement() {
        let h = hill();
        let mut store = MotionStore::new(3);
        let raised = store.advance_all(&h.net, &MotionConfig::default(), 0.5);
        assert_eq!(
            raised,
            vec![
                (AgentId(0), Completion::Ready),
                (AgentId(1), Completion::Ready),
                (AgentId(2), Completion::Ready),
            ]
        );
    }

    #[test]
    fn quiet_agents_are_not_reported() {
        let h = hill();
        let mut store = MotionStore::new(2);
        let s = store.state_mut(AgentId(1)).unwrap();
        s.position = TOP;
        s.start_trail(h.steep, &h.net).unwrap();
        store.get_mut(AgentId(0)).unwrap().idle(10.0);
        let raised = store.advance_all(&h.net, &MotionConfig::default(), 0.5);
        assert!(raised.is_empty());
        assert!(store.state_mut(AgentId(9)).is_err());
    }
}
