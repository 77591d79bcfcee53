//! `piste-sim`: the per-agent controller and tick loop.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Advance  MotionStore::advance_all moves every agent and collects
//!              completion signals (parallel with the `parallel` feature).
//!   ② Resolve  in ascending AgentId order, for every agent that raised a
//!              completion or is due an exit scan:
//!                consult the GoalPlanner if the goal is stale,
//!                ask the DecisionEngine for the next edge,
//!                fire `on_*_intended` immediately,
//!              so agents resolved later in the same tick see the intent.
//!   ③ Apply    in the same order: fire completed / exited for the edge
//!              being left, enter the next phase, fire `on_*_entered`.
//! ```
//!
//! # Fallback ladder
//!
//! When a decision point has no candidates (unplaced agent, dead end, lost
//! edge) the controller searches for lift bottoms and trail starts in a
//! growing radius, then walks to the nearest lift bottom at any distance,
//! then to the nearest lodge, and finally idles the agent for
//! `idle_retry_secs` before trying again.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs ① on a rayon pool.                                   |
//! | `serde`    | `ResortConfig` and its parts derive `Serialize`/`Deserialize`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use piste_agent::AgentStoreBuilder;
//! use piste_decision::NoopPlanner;
//! use piste_sim::{NoopObserver, ResortConfig, SimBuilder};
//!
//! let config = ResortConfig::default();
//! let (agents, rngs) = AgentStoreBuilder::new(500, config.sim.seed).build()?;
//! let mut sim = SimBuilder::new(config.sim.clone(), network, agents, rngs, NoopPlanner)
//!     .resort(config)
//!     .initial_positions(positions)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
mod controller;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{ControllerConfig, ResortConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
