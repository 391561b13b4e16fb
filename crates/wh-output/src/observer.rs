//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;
use wh_actor::ForkliftAction;
use wh_core::{Round, Vector};
use wh_sim::{RoundReport, SimObserver, SimStatus, WorldView};

use crate::row::{ActionRow, ActorSnapshotRow, OutcomeRow, RoundSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes actions, snapshots and round summaries to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    last_summary: Option<RoundSummaryRow>,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_summary: None, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }

    fn write_snapshot(&mut self, round: Round, world: &WorldView<'_>) {
        let rows = snapshot_rows(round, world);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_sim_start(&mut self, world: &WorldView<'_>) {
        self.last_summary = Some(summary_row(world));
        self.write_snapshot(world.round, world);
    }

    fn on_round_end(&mut self, report: &RoundReport, world: &WorldView<'_>) {
        let rows = action_rows(report, world);
        let result = self.writer.write_actions(&rows);
        self.store_err(result);

        let summary = summary_row(world);
        let result = self.writer.write_round_summary(&summary);
        self.store_err(result);
        self.last_summary = Some(summary);
    }

    fn on_snapshot(&mut self, round: Round, world: &WorldView<'_>) {
        self.write_snapshot(round, world);
    }

    fn on_sim_end(&mut self, final_round: Round, status: SimStatus) {
        let (delivered, remaining) = self
            .last_summary
            .map_or((0, 0), |s| (s.delivered, s.remaining));
        let outcome = OutcomeRow {
            rounds: final_round.0,
            status: status.as_str(),
            delivered,
            total: delivered + remaining,
        };
        let result = self.writer.write_outcome(&outcome);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}

// ── Row builders ──────────────────────────────────────────────────────────────

fn summary_row(world: &WorldView<'_>) -> RoundSummaryRow {
    RoundSummaryRow {
        round:     world.round.0,
        delivered: world.delivered() as u64,
        remaining: world.remaining() as u64,
        status:    world.status.as_str(),
    }
}

fn snapshot_rows(round: Round, world: &WorldView<'_>) -> Vec<ActorSnapshotRow> {
    let row = |kind, name: &str, pos: Vector, status| ActorSnapshotRow {
        round: round.0,
        kind,
        name: name.to_owned(),
        x: pos.x,
        y: pos.y,
        status,
    };
    let parcels = world
        .parcels
        .iter()
        .map(|p| row("parcel", p.name(), p.position(), p.status().as_str()));
    let forklifts = world
        .forklifts
        .iter()
        .map(|f| row("forklift", f.name(), f.position(), f.status().as_str()));
    let trucks = world
        .trucks
        .iter()
        .map(|t| row("truck", t.name(), t.position(), t.status().as_str()));
    parcels.chain(forklifts).chain(trucks).collect()
}

fn action_rows(report: &RoundReport, world: &WorldView<'_>) -> Vec<ActionRow> {
    let round = report.round.0;
    let forklifts = report.forklifts.iter().filter_map(|&(id, action)| {
        let forklift = world.forklift(id)?;
        Some(ActionRow { round, actor: forklift.name().to_owned(), action: describe(action, world) })
    });
    let trucks = report.trucks.iter().filter_map(|&(id, truck_report)| {
        let truck = world.truck(id)?;
        Some(ActionRow { round, actor: truck.name().to_owned(), action: truck_report.to_string() })
    });
    forklifts.chain(trucks).collect()
}

/// Renders an action with parcel names and colours resolved.
fn describe(action: ForkliftAction, world: &WorldView<'_>) -> String {
    let (verb, id) = match action {
        ForkliftAction::Wait      => return "WAIT".to_owned(),
        ForkliftAction::Go(pos)   => return format!("GO {pos}"),
        ForkliftAction::Take(id)  => ("TAKE", id),
        ForkliftAction::Leave(id) => ("LEAVE", id),
    };
    match world.parcel(id) {
        Some(parcel) => format!("{verb} {} {}", parcel.name(), parcel.class()),
        None => format!("{verb} {id}"),
    }
}
