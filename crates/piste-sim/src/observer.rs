//! Hooks for watching a run without touching its state.

use piste_agent::AgentStore;
use piste_core::{AgentId, Tick};
use piste_decision::Candidate;
use piste_motion::MotionStore;
use piste_traffic::TrafficState;

/// Receives events from [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks].  Every method defaults to a
/// no-op.
///
/// ```rust,ignore
/// /// Counts lift picks per tick.
/// struct LiftTally(usize);
///
/// impl SimObserver for LiftTally {
///     fn on_decision(&mut self, _tick: Tick, _agent: AgentId, chosen: Candidate) {
///         if matches!(chosen, Candidate::Lift(_)) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before motion is advanced.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// One call per routing decision, in resolve order.  Placement, trail
    /// and lift picks and taken exits all count.
    fn on_decision(&mut self, _tick: Tick, _agent: AgentId, _chosen: Candidate) {}

    fn on_tick_end(&mut self, _tick: Tick, _decisions: usize) {}

    /// After the apply pass on every tick divisible by
    /// `output_interval_ticks`, tick 0 included.
    fn on_snapshot(
        &mut self,
        _tick:    Tick,
        _motion:  &MotionStore,
        _agents:  &AgentStore,
        _traffic: &TrafficState,
    ) {}

    /// Only from `run`, once the end tick is reached.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
