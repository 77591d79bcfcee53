//! `piste-decision`: how a visitor picks the next trail or lift.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`preference`]  | `Preference`, `PreferenceTable`, `traversal_willingness`        |
//! | [`config`]      | `DecisionConfig`, `DecisionWeights`, `LookaheadConfig`          |
//! | [`downstream`]  | `DownstreamEvaluator`: bounded, memoized, cycle-safe lookahead |
//! | [`score`]       | `Candidate`, `CandidateFactors`, pure `score_factors`           |
//! | [`choose`]      | `softmax`, `sample_index`, `DecisionEngine`                     |
//! | [`planner`]     | `GoalPlanner` trait, `NoopPlanner`                              |
//! | [`error`]       | `DecisionError`, `DecisionResult<T>`                            |
//!
//! # Decision pipeline
//!
//! ```text
//! candidates ──▶ gather factors ──▶ score_factors ──▶ softmax(T) ──▶ sample
//!                 │  preference table (hard block / desperate / weight)
//!                 │  downstream lookahead (cached per skill, edge, depth)
//!                 │  traffic: deficit, crowding, recent popularity
//!                 └  agent: goal step, visited edges, personality offsets
//! ```
//!
//! The engine never fires traffic events.  The caller records the "intended"
//! event for whatever [`DecisionEngine::choose`] returns, before the next
//! agent decides.

pub mod choose;
pub mod config;
pub mod downstream;
pub mod error;
pub mod planner;
pub mod preference;
pub mod score;

#[cfg(test)]
mod tests;

pub use choose::{sample_index, softmax, DecisionEngine};
pub use config::{DecisionConfig, DecisionWeights, LookaheadConfig};
pub use downstream::DownstreamEvaluator;
pub use error::{DecisionError, DecisionResult};
pub use planner::{GoalPlanner, NoopPlanner};
pub use preference::{traversal_willingness, Preference, PreferenceTable, DESPERATE_PREFERENCE};
pub use score::{score_factors, Candidate, CandidateFactors};
