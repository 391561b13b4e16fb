//! `wh-output` — simulation output writers for the warehouse simulator.
//!
//! Two backends are provided:
//!
//! | Writer           | Output                                                      |
//! |------------------|-------------------------------------------------------------|
//! | `TextLogWriter`  | Round-by-round action log on any `io::Write` (e.g. stdout)  |
//! | `CsvWriter`      | `actor_snapshots.csv`, `round_summaries.csv`, `actions.csv` |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `wh_sim::SimObserver`.  Writers compose: a pair of
//! writers writes to both, and `Option<W>` writes only when present.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, SimOutputObserver, TextLogWriter};
//!
//! let writer = (TextLogWriter::new(std::io::stdout()), CsvWriter::new(dir)?);
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ActionRow, ActorSnapshotRow, OutcomeRow, RoundSummaryRow};
pub use text::TextLogWriter;
pub use writer::OutputWriter;
