//! `piste-core`: foundational types for the `piste` resort flow simulation.
//!
//! This crate is a dependency of every other `piste-*` crate.  It has no
//! `piste-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TrailId`, `LiftId`, `LodgeId`             |
//! | [`geo`]         | `Vec3` world-space point / vector                     |
//! | [`skill`]       | `SkillLevel`, `TrailClass`                            |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng`, one deterministic stream per visitor      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod skill;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Vec3;
pub use ids::{AgentId, LiftId, LodgeId, TrailId};
pub use rng::AgentRng;
pub use skill::{SkillLevel, TrailClass};
pub use time::{SimClock, SimConfig, Tick};
