//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `actor_snapshots.csv`
//! - `round_summaries.csv`
//! - `actions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ActionRow, ActorSnapshotRow, OutputResult, RoundSummaryRow};

pub const SNAPSHOTS_FILE: &str = "actor_snapshots.csv";
pub const SUMMARIES_FILE: &str = "round_summaries.csv";
pub const ACTIONS_FILE: &str = "actions.csv";

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    actions:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(["round", "kind", "name", "x", "y", "status"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record(["round", "delivered", "remaining", "status"])?;

        let mut actions = Writer::from_path(dir.join(ACTIONS_FILE))?;
        actions.write_record(["round", "actor", "action"])?;

        Ok(Self { snapshots, summaries, actions, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[ActorSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.round.to_string(),
                row.kind.to_owned(),
                row.name.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.status.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_actions(&mut self, rows: &[ActionRow]) -> OutputResult<()> {
        for row in rows {
            self.actions.write_record(&[row.round.to_string(), row.actor.clone(), row.action.clone()])?;
        }
        Ok(())
    }

    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.round.to_string(),
            row.delivered.to_string(),
            row.remaining.to_string(),
            row.status.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.actions.flush()?;
        Ok(())
    }
}
