//! Controller tuning and the aggregate `ResortConfig`.

use piste_core::SimConfig;
use piste_decision::{DecisionConfig, PreferenceTable};
use piste_motion::MotionConfig;
use piste_traffic::TrafficConfig;

use crate::{SimError, SimResult};

// ── ControllerConfig ──────────────────────────────────────────────────────────

/// Search radii, timers and replanning switches used by the controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// First radius (m) searched for lift bottoms and trail starts when
    /// placing an agent.
    pub search_radius: f32,
    /// Factor applied to the radius after every empty search.
    pub fallback_radius_growth: f32,
    /// Radius beyond which the ladder gives up searching and walks to the
    /// nearest lift bottom instead.
    pub fallback_radius_cap: f32,
    /// Radius (m) around a skier in which exits are detected.
    pub exit_detection_radius: f32,
    /// Seconds of skiing between exit scans.
    pub exit_scan_interval_secs: f32,
    /// Added to an exit's score when the agent has never used it.
    pub exit_novelty_bonus: f32,
    /// Multiplies the exit's traffic deficit and is added to its score.
    pub exit_deficit_bonus: f32,
    /// An agent that wants rest takes a lodge within this radius.
    pub lodge_search_radius: f32,
    pub lodge_rest_secs: f32,
    /// Wait before a stranded agent is placed again.
    pub idle_retry_secs: f32,
    /// Ask the planner for a fresh goal at the end of every trail.
    pub replan_after_every_run: bool,
    /// Ask the planner for a fresh goal at every lift top.
    pub replan_at_lift_top: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            search_radius:           40.0,
            fallback_radius_growth:  2.0,
            fallback_radius_cap:     640.0,
            exit_detection_radius:   20.0,
            exit_scan_interval_secs: 1.0,
            exit_novelty_bonus:      0.3,
            exit_deficit_bonus:      0.2,
            lodge_search_radius:     150.0,
            lodge_rest_secs:         900.0,
            idle_retry_secs:         30.0,
            replan_after_every_run:  false,
            replan_at_lift_top:      false,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("search_radius", self.search_radius),
            ("exit_detection_radius", self.exit_detection_radius),
            ("exit_scan_interval_secs", self.exit_scan_interval_secs),
            ("lodge_search_radius", self.lodge_search_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.fallback_radius_growth > 1.0 && self.fallback_radius_growth.is_finite()) {
            return Err(SimError::Config(format!(
                "fallback_radius_growth must be > 1, got {}",
                self.fallback_radius_growth
            )));
        }
        if !(self.fallback_radius_cap >= self.search_radius && self.fallback_radius_cap.is_finite()) {
            return Err(SimError::Config(format!(
                "fallback_radius_cap ({}) must be >= search_radius ({})",
                self.fallback_radius_cap, self.search_radius
            )));
        }
        for (name, value) in [("lodge_rest_secs", self.lodge_rest_secs), ("idle_retry_secs", self.idle_retry_secs)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        if !(self.exit_novelty_bonus.is_finite() && self.exit_deficit_bonus.is_finite()) {
            return Err(SimError::Config("exit bonuses must be finite".into()));
        }
        Ok(())
    }
}

// ── ResortConfig ──────────────────────────────────────────────────────────────

/// Every tunable of a run in one place; what the demo reads from TOML.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResortConfig {
    pub sim:         SimConfig,
    pub traffic:     TrafficConfig,
    pub decision:    DecisionConfig,
    pub preferences: PreferenceTable,
    pub motion:      MotionConfig,
    pub controller:  ControllerConfig,
}

impl ResortConfig {
    pub fn validate(&self) -> SimResult<()> {
        self.sim.validate()?;
        self.decision.validate()?;
        self.preferences.validate()?;
        self.motion.validate()?;
        self.controller.validate()
    }
}
