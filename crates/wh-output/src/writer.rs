//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ActionRow, ActorSnapshotRow, OutcomeRow, OutputResult, RoundSummaryRow};

/// Trait implemented by the text and CSV writers.
///
/// Every method defaults to doing nothing, so a backend only implements the
/// streams it records.  Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of actor snapshots.
    fn write_snapshots(&mut self, _rows: &[ActorSnapshotRow]) -> OutputResult<()> {
        Ok(())
    }

    /// Write every action of one round, forklifts first, then trucks.
    fn write_actions(&mut self, _rows: &[ActionRow]) -> OutputResult<()> {
        Ok(())
    }

    /// Write one round summary row.
    fn write_round_summary(&mut self, _row: &RoundSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    /// Write the final result.  Called once, before [`finish`][Self::finish].
    fn write_outcome(&mut self, _row: &OutcomeRow) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Absent writer: every call succeeds without doing anything.
impl<W: OutputWriter> OutputWriter for Option<W> {
    fn write_snapshots(&mut self, rows: &[ActorSnapshotRow]) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_snapshots(rows))
    }

    fn write_actions(&mut self, rows: &[ActionRow]) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_actions(rows))
    }

    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_round_summary(row))
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_outcome(row))
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.finish())
    }
}

/// Writes to both; the second writer still runs when the first fails, and
/// the first error wins.
impl<A: OutputWriter, B: OutputWriter> OutputWriter for (A, B) {
    fn write_snapshots(&mut self, rows: &[ActorSnapshotRow]) -> OutputResult<()> {
        both(self.0.write_snapshots(rows), self.1.write_snapshots(rows))
    }

    fn write_actions(&mut self, rows: &[ActionRow]) -> OutputResult<()> {
        both(self.0.write_actions(rows), self.1.write_actions(rows))
    }

    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        both(self.0.write_round_summary(row), self.1.write_round_summary(row))
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        both(self.0.write_outcome(row), self.1.write_outcome(row))
    }

    fn finish(&mut self) -> OutputResult<()> {
        both(self.0.finish(), self.1.finish())
    }
}

fn both(first: OutputResult<()>, second: OutputResult<()>) -> OutputResult<()> {
    first.and(second)
}
