//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use piste_agent::AgentStore;
use piste_core::{SimConfig, Tick};
use piste_motion::MotionStore;
use piste_sim::SimObserver;
use piste_traffic::TrafficState;

use crate::row::{AgentSnapshotRow, EdgeLoadRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots, edge loads and tick summaries
/// to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: f32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, tick_duration_secs: config.tick_duration_secs, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, decisions: usize) {
        let row = TickSummaryRow {
            tick:         tick.0,
            elapsed_secs: tick.0 as f64 * self.tick_duration_secs as f64,
            decisions:    decisions as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, motion: &MotionStore, agents: &AgentStore, traffic: &TrafficState) {
        let rows: Vec<AgentSnapshotRow> = agents
            .contexts
            .iter()
            .zip(&motion.states)
            .map(|(ctx, state)| AgentSnapshotRow::from_state(ctx.id.0, tick.0, ctx.skill.as_str(), state))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }

        let trails = traffic.trail_loads().into_iter().map(|(id, r)| ("trail", id.0, r));
        let lifts = traffic.lift_loads().into_iter().map(|(id, r)| ("lift", id.0, r));
        let loads: Vec<EdgeLoadRow> = trails
            .chain(lifts)
            .map(|(kind, edge_id, r)| EdgeLoadRow {
                tick: tick.0,
                kind,
                edge_id,
                capacity: r.capacity,
                occupancy: r.occupancy,
                deficit: r.deficit(),
                crowding: r.crowding(),
            })
            .collect();
        if !loads.is_empty() {
            let result = self.writer.write_edge_loads(&loads);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
