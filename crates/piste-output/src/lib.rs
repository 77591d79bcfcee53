//! `piste-output`: simulation output writers.
//!
//! The CSV backend creates three files in the output directory:
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `agent_snapshots.csv` | agent, every snapshot tick                    |
//! | `edge_loads.csv`      | registered trail or lift, every snapshot tick |
//! | `tick_summaries.csv`  | tick                                          |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `piste_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use piste_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, EdgeLoadRow, TickSummaryRow};
pub use writer::OutputWriter;
