//! `piste-motion`: the per-agent phase state machine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`phase`]    | `Phase` (one active per agent), `Completion` signals            |
//! | [`state`]    | `MotionState`: phase, tracked position, lateral offset, exit sets |
//! | [`lateral`]  | Deterministic smooth drift across the trail width               |
//! | [`advance`]  | `advance`: one tick of motion for one agent                    |
//! | [`store`]    | `MotionStore`: `Vec<MotionState>` + `advance_all`              |
//! | [`config`]   | `MotionConfig`, `LateralConfig`                                 |
//! | [`error`]    | `MotionError`, `MotionResult<T>`                                |
//!
//! # Phases
//!
//! ```text
//!            ┌──────────── ReachedLift ───────────┐
//!            │                                    ▼
//!   WalkingToLift                            RidingLift ── LiftTop ──▶ SkiingTrail
//!            ▲                                                            │
//!            └──────────────────── TrailEnd (controller decides) ◀────────┘
//!
//!   WalkingToLodge ── ReachedLodge ──▶ InLodge ── Rested ──▶ (controller decides)
//!   Idle ── Ready ──▶ (controller places the agent)
//! ```
//!
//! The motion layer never picks the next phase itself: [`advance`] raises a
//! [`Completion`] and the owning controller decides what comes next.
//!
//! # Movement model
//!
//! Phase logic computes a *target* position every tick: a point on the walk
//! line, on the lift cable, or on the trail centre line plus a lateral
//! offset.  The tracked position then moves towards that target by at most
//! `max_speed × Δt` ([`MotionConfig::max_speed`]), so no tick ever jumps
//! further than that, however discontinuous the target.
//!
//! Trail progress is a distance in metres along the centre line, never a
//! fraction, so slope-dependent speed is a simple multiplier on the ski
//! speed.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `MotionStore::advance_all` runs on the rayon pool.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.   |

pub mod advance;
pub mod config;
pub mod error;
pub mod lateral;
pub mod phase;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use advance::advance;
pub use config::{LateralConfig, MotionConfig};
pub use error::{MotionError, MotionResult};
pub use phase::{Completion, Phase};
pub use state::MotionState;
pub use store::MotionStore;
