//! Lateral drift across the trail width.
//!
//! One-dimensional value noise: every agent gets its own lattice of random
//! values spaced `wavelength` metres apart along the distance it has skied,
//! smoothstep-interpolated in between.  The result is continuous, repeatable
//! for the same `(agent, distance)` and needs no per-agent storage.

use piste_core::AgentId;

use crate::LateralConfig;

/// Normalised drift target in `[-1, 1]` for `agent` after skiing `distance`
/// metres.
pub fn drift_target(agent: AgentId, distance: f32, wavelength: f32) -> f32 {
    let x = distance.max(0.0) / wavelength.max(f32::EPSILON);
    let cell = x.floor();
    let f = x - cell;
    let s = f * f * (3.0 - 2.0 * f);
    let a = lattice(agent, cell as u64);
    let b = lattice(agent, cell as u64 + 1);
    a + (b - a) * s
}

/// Next lateral offset, moving from `current` towards the scaled
/// `target_norm` by at most `max_rate * dt`.
///
/// The result is always within `±width_fraction * half_width`, even when the
/// previous offset belonged to a wider trail.
pub fn step_offset(current: f32, target_norm: f32, half_width: f32, config: &LateralConfig, dt: f32) -> f32 {
    let limit = config.width_fraction * half_width.max(0.0);
    let desired = target_norm.clamp(-1.0, 1.0) * limit;
    let max_delta = config.max_rate * dt.max(0.0);
    let next = current + (desired - current).clamp(-max_delta, max_delta);
    next.clamp(-limit, limit)
}

/// Lattice value in `[-1, 1]`.  SplitMix64 finaliser over the agent id and
/// the cell index.
fn lattice(agent: AgentId, cell: u64) -> f32 {
    let mut z = (u64::from(agent.0) << 32) ^ cell.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    // Top 24 bits → [0, 1] exactly representable in f32.
    let unit = (z >> 40) as f32 / ((1u64 << 24) - 1) as f32;
    unit * 2.0 - 1.0
}
