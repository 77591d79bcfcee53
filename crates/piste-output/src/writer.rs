//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, EdgeLoadRow, OutputResult, TickSummaryRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`](crate::SimOutputObserver) and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_edge_loads(&mut self, rows: &[EdgeLoadRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
