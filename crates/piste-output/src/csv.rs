//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, EdgeLoadRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 12] = [
    "agent_id", "tick", "skill", "phase", "edge_kind", "edge_id", "progress", "x", "y", "z", "yaw",
    "lateral_offset",
];
pub const EDGE_LOAD_HEADER: [&str; 7] = ["tick", "kind", "edge_id", "capacity", "occupancy", "deficit", "crowding"];
pub const SUMMARY_HEADER: [&str; 3] = ["tick", "elapsed_secs", "decisions"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    edge_loads: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut edge_loads = Writer::from_path(dir.join("edge_loads.csv"))?;
        edge_loads.write_record(EDGE_LOAD_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, edge_loads, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let edge_id = if row.edge_id == crate::row::NO_EDGE { String::new() } else { row.edge_id.to_string() };
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.skill.to_owned(),
                row.phase.to_owned(),
                row.edge_kind.to_owned(),
                edge_id,
                format!("{:.3}", row.progress),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                format!("{:.2}", row.z),
                format!("{:.4}", row.yaw),
                format!("{:.2}", row.lateral_offset),
            ])?;
        }
        Ok(())
    }

    fn write_edge_loads(&mut self, rows: &[EdgeLoadRow]) -> OutputResult<()> {
        for row in rows {
            self.edge_loads.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                row.edge_id.to_string(),
                format!("{:.2}", row.capacity),
                row.occupancy.to_string(),
                format!("{:.4}", row.deficit),
                format!("{:.4}", row.crowding),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.1}", row.elapsed_secs),
            row.decisions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.edge_loads.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
