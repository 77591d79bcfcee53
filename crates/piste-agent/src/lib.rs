//! `piste-agent`: per-visitor state for the `piste` resort simulation.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`personality`]   | `Factor`, `PersonalityOffsets` (fixed per-agent weight perturbation) |
//! | [`goal`]          | `GoalStep`, `Goal` (opaque multi-hop plan with a cursor)  |
//! | [`context`]       | `AgentContext`, `VisitedEdges`                            |
//! | [`store`]         | `AgentStore` (contexts), `AgentRngs` (per-agent RNG)      |
//! | [`builder`]       | `AgentStoreBuilder` (fluent construction)                 |
//! | [`error`]         | `AgentError`, `AgentResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod context;
pub mod error;
pub mod goal;
pub mod personality;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use context::{AgentContext, VisitedEdges};
pub use error::{AgentError, AgentResult};
pub use goal::{Goal, GoalStep};
pub use personality::{Factor, PersonalityOffsets};
pub use store::{AgentRngs, AgentStore};
