//! Plain-text round log.
//!
//! ```text
//! round 1
//! lift GO [1,1]
//! van WAITING 0/1000
//! round 2
//! lift TAKE box GREEN
//! van WAITING 0/1000
//! …
//! FINISHED after 7 rounds: 1/1 parcels delivered
//! ```

use std::io::Write;

use crate::writer::OutputWriter;
use crate::{ActionRow, OutcomeRow, OutputResult};

/// Writes the round log to any byte sink.
pub struct TextLogWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl<W: Write> TextLogWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Unwrap the sink (e.g. to inspect a buffer after the run).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputWriter for TextLogWriter<W> {
    fn write_actions(&mut self, rows: &[ActionRow]) -> OutputResult<()> {
        let Some(first) = rows.first() else {
            return Ok(());
        };
        writeln!(self.out, "round {}", first.round)?;
        for row in rows {
            writeln!(self.out, "{} {}", row.actor, row.action)?;
        }
        Ok(())
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        writeln!(
            self.out,
            "{} after {} rounds: {}/{} parcels delivered",
            row.status, row.rounds, row.delivered, row.total
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
