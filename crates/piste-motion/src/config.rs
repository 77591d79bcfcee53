//! Speeds, the slope band and lateral drift tuning.

use crate::{MotionError, MotionResult};

// ── LateralConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LateralConfig {
    /// Maximum change of the lateral offset, metres per second.
    pub max_rate: f32,
    /// Share of the half-width the offset may use; keeps skiers off the edge.
    pub width_fraction: f32,
    /// Distance along the trail (m) between independent noise samples.
    pub wavelength: f32,
}

impl Default for LateralConfig {
    fn default() -> Self {
        Self { max_rate: 0.8, width_fraction: 0.85, wavelength: 60.0 }
    }
}

// ── MotionConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Walking speed towards a lift bottom or lodge, m/s.
    pub walk_speed: f32,
    /// Cable speed, m/s.
    pub lift_speed: f32,
    /// Base skiing speed before the slope multiplier, m/s.
    pub ski_speed: f32,
    /// Speed multiplier on flat ground.
    pub slope_multiplier_min: f32,
    /// Speed multiplier at or beyond `max_slope_degrees`.
    pub slope_multiplier_max: f32,
    pub max_slope_degrees: f32,
    /// `max_speed = max(walk, lift, ski) * safety_factor`.
    pub safety_factor: f32,
    /// A walker within this distance (m) of its target has arrived.
    pub arrival_tolerance: f32,
    pub lateral: LateralConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed:           1.4,
            lift_speed:           5.0,
            ski_speed:            9.0,
            slope_multiplier_min: 0.6,
            slope_multiplier_max: 1.8,
            max_slope_degrees:    35.0,
            safety_factor:        2.0,
            arrival_tolerance:    0.5,
            lateral:              LateralConfig::default(),
        }
    }
}

impl MotionConfig {
    /// Upper bound on the tracked position's speed, m/s.
    pub fn max_speed(&self) -> f32 {
        self.walk_speed.max(self.lift_speed).max(self.ski_speed) * self.safety_factor
    }

    /// Ski speed multiplier for a downhill angle in radians.
    ///
    /// Linear from `slope_multiplier_min` at 0° to `slope_multiplier_max` at
    /// `max_slope_degrees`, flat beyond.
    pub fn slope_multiplier(&self, slope_radians: f32) -> f32 {
        let t = (slope_radians.to_degrees() / self.max_slope_degrees).clamp(0.0, 1.0);
        self.slope_multiplier_min + (self.slope_multiplier_max - self.slope_multiplier_min) * t
    }

    pub fn validate(&self) -> MotionResult<()> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("lift_speed", self.lift_speed),
            ("ski_speed", self.ski_speed),
            ("slope_multiplier_min", self.slope_multiplier_min),
            ("max_slope_degrees", self.max_slope_degrees),
            ("lateral.wavelength", self.lateral.wavelength),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(MotionError::InvalidSpeed { name, value });
            }
        }
        if !(self.slope_multiplier_max >= self.slope_multiplier_min && self.slope_multiplier_max.is_finite()) {
            return Err(MotionError::Config(format!(
                "slope_multiplier_max ({}) must be >= slope_multiplier_min ({})",
                self.slope_multiplier_max, self.slope_multiplier_min
            )));
        }
        // The tracked position must be able to keep up with the fastest phase.
        let fastest_phase = self.walk_speed.max(self.lift_speed).max(self.ski_speed * self.slope_multiplier_max);
        if !(self.max_speed() >= fastest_phase) {
            return Err(MotionError::Config(format!(
                "safety_factor {} leaves max_speed {} below the fastest phase speed {fastest_phase}",
                self.safety_factor,
                self.max_speed()
            )));
        }
        if !(self.arrival_tolerance >= 0.0 && self.arrival_tolerance.is_finite()) {
            return Err(MotionError::Config(format!(
                "arrival_tolerance must be >= 0, got {}",
                self.arrival_tolerance
            )));
        }
        if !(self.lateral.width_fraction >= 0.0 && self.lateral.width_fraction <= 1.0) {
            return Err(MotionError::Config(format!(
                "lateral.width_fraction must be in [0, 1], got {}",
                self.lateral.width_fraction
            )));
        }
        if !(self.lateral.max_rate >= 0.0 && self.lateral.max_rate.is_finite()) {
            return Err(MotionError::Config(format!(
                "lateral.max_rate must be >= 0, got {}",
                self.lateral.max_rate
            )));
        }
        Ok(())
    }
}
