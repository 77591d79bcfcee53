//! Unit tests for piste-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, LiftId, LodgeId, TrailId};

    #[test]
    fn index_is_the_raw_value() {
        assert_eq!(TrailId(42).index(), 42);
        assert_eq!(AgentId(0).index(), 0);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(LiftId::default(), LiftId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(LiftId(7).to_string(), "lift#7");
        assert_eq!(AgentId(3).to_string(), "agent#3");
        assert_eq!(LodgeId(0).to_string(), "lodge#0");
    }
}

#[cfg(test)]
mod geo {
    use crate::Vec3;

    #[test]
    fn distance_and_horizontal_distance() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 12.0, 4.0);
        assert!((a.distance(b) - 13.0).abs() < 1e-5);
        assert!((a.horizontal_distance(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn move_towards_never_overshoots() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(a.move_towards(b, 4.0), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(a.move_towards(b, 25.0), b);
    }

    #[test]
    fn lerp_clamps() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 2.0, 2.0);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(a.lerp(b, 3.0), b);
    }

    #[test]
    fn perpendicular_is_horizontal_unit() {
        let dir = Vec3::new(0.0, -1.0, 5.0);
        let p = dir.horizontal_perpendicular();
        assert_eq!(p.y, 0.0);
        assert!((p.length() - 1.0).abs() < 1e-5);
        assert!(p.dot(Vec3::new(0.0, 0.0, 1.0)).abs() < 1e-5);
    }

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }
}

#[cfg(test)]
mod skill {
    use crate::{SkillLevel, TrailClass};

    #[test]
    fn ordinal_gap() {
        assert_eq!(SkillLevel::Expert.gap_to(TrailClass::Green), 3);
        assert_eq!(SkillLevel::Beginner.gap_to(TrailClass::Blue), -1);
        assert_eq!(SkillLevel::Intermediate.gap_to(TrailClass::Blue), 0);
    }

    #[test]
    fn ordering_follows_difficulty() {
        assert!(TrailClass::Green < TrailClass::DoubleBlack);
        assert!(SkillLevel::Beginner < SkillLevel::Expert);
    }

    #[test]
    fn display() {
        assert_eq!(TrailClass::DoubleBlack.to_string(), "double_black");
        assert_eq!(SkillLevel::Advanced.to_string(), "advanced");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SimClock, SimConfig, Tick};

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(2.0);
        for _ in 0..1_830 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T1830 (01:01:00)");
        assert_eq!(Tick(4).to_string(), "T4");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        for _ in 0..7_322 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_secs(), 3_661.0);
        assert_eq!(clock.elapsed_hms(), (1, 1, 1));
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        let bad = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(CoreError::InvalidTickDuration(_))));
        let nan = SimConfig { tick_duration_secs: f32::NAN, ..SimConfig::default() };
        assert!(nan.validate().is_err());
        let bad_threads = SimConfig { num_threads: Some(0), ..SimConfig::default() };
        assert!(matches!(bad_threads.validate(), Err(CoreError::ZeroThreads)));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn identity_stream_ignores_run_seed() {
        let mut r1 = AgentRng::for_identity(AgentId(9));
        let mut r2 = AgentRng::for_identity(AgentId(9));
        let a: u64 = r1.random();
        let b: u64 = r2.random();
        assert_eq!(a, b);

        let mut other = AgentRng::for_identity(AgentId(10));
        let c: u64 = other.random();
        assert_ne!(a, c);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
