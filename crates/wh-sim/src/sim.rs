//! The `Simulation` struct and its round loop.

use std::fmt;

use tracing::{debug, info, warn};
use wh_actor::{Forklift, Parcel, RoundContext, Truck};
use wh_core::{ForkliftId, Round, SimConfig, TruckId};
use wh_spatial::{AStar, Board, PathFinder};

use crate::{RoundReport, SimBuilder, SimObserver, SimResult, WorldSnapshot, WorldView};

// ── SimStatus ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimStatus {
    /// Built, not started.
    #[default]
    Idle,
    Running,
    /// Every parcel was delivered.
    Finished,
    /// The round budget ran out with parcels left.
    Unfinished,
}

impl SimStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            SimStatus::Idle       => "IDLE",
            SimStatus::Running    => "RUNNING",
            SimStatus::Finished   => "FINISHED",
            SimStatus::Unfinished => "UNFINISHED",
        }
    }

    /// `Finished` or `Unfinished`.
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, SimStatus::Finished | SimStatus::Unfinished)
    }
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the board and every actor collection.  Collections are never
/// reordered, so an actor's index is its id for the whole run and actors are
/// always processed in registration order.
///
/// Create via [`SimBuilder`].
pub struct Simulation<R: PathFinder = AStar> {
    config:     SimConfig,
    board:      Board,
    parcels:    Vec<Parcel>,
    forklifts:  Vec<Forklift>,
    trucks:     Vec<Truck>,
    pathfinder: R,
    round:      Round,
    status:     SimStatus,
}

impl Simulation {
    /// Validate `snapshot` and build a simulation using the default A*.
    pub fn from_snapshot(snapshot: WorldSnapshot) -> SimResult<Self> {
        SimBuilder::new(snapshot, AStar::new()).build()
    }
}

impl<R: PathFinder> Simulation<R> {
    pub(crate) fn assemble(
        config:     SimConfig,
        board:      Board,
        parcels:    Vec<Parcel>,
        forklifts:  Vec<Forklift>,
        trucks:     Vec<Truck>,
        pathfinder: R,
    ) -> Self {
        let mut sim = Self {
            config,
            board,
            parcels,
            forklifts,
            trucks,
            pathfinder,
            round: Round::ZERO,
            status: SimStatus::Idle,
        };
        sim.rebuild_board();
        sim
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    #[inline] pub fn config(&self) -> &SimConfig { &self.config }
    #[inline] pub fn board(&self) -> &Board { &self.board }
    #[inline] pub fn parcels(&self) -> &[Parcel] { &self.parcels }
    #[inline] pub fn forklifts(&self) -> &[Forklift] { &self.forklifts }
    #[inline] pub fn trucks(&self) -> &[Truck] { &self.trucks }
    #[inline] pub fn round(&self) -> Round { self.round }
    #[inline] pub fn status(&self) -> SimStatus { self.status }

    pub fn view(&self) -> WorldView<'_> {
        WorldView {
            round:     self.round,
            status:    self.status,
            board:     &self.board,
            parcels:   &self.parcels,
            forklifts: &self.forklifts,
            trucks:    &self.trucks,
        }
    }

    /// `true` once no parcel is left outside a truck.
    pub fn all_delivered(&self) -> bool {
        self.parcels.iter().all(Parcel::is_delivered)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Reset the round counter and start running.
    pub fn start(&mut self) {
        self.round = Round::ZERO;
        self.status = SimStatus::Running;
        info!(
            width     = self.board.width(),
            height    = self.board.height(),
            parcels   = self.parcels.len(),
            forklifts = self.forklifts.len(),
            trucks    = self.trucks.len(),
            budget    = self.config.max_rounds,
            "simulation started"
        );
    }

    /// Play one round.
    ///
    /// Returns `None` without touching any state unless the simulation is
    /// `Running`, and also when every parcel was already delivered (the
    /// status becomes `Finished`).
    pub fn simulate_round(&mut self) -> Option<RoundReport> {
        if self.status != SimStatus::Running {
            return None;
        }
        if self.all_delivered() {
            self.status = SimStatus::Finished;
            return None;
        }

        let round = self.round.next();
        let mut report = RoundReport::new(round);

        // Split borrows: the context lends everything but the forklifts.
        {
            let mut ctx = RoundContext::new(
                round,
                &mut self.board,
                &mut self.parcels,
                &mut self.trucks,
                &self.pathfinder,
            );
            for (i, forklift) in self.forklifts.iter_mut().enumerate() {
                let action = forklift.simulate_round(&mut ctx);
                report.forklifts.push((ForkliftId(i as u32), action));
            }
        }

        for (i, truck) in self.trucks.iter_mut().enumerate() {
            let truck_report = truck.simulate_round(&self.parcels, &mut self.board);
            report.trucks.push((TruckId(i as u32), truck_report));
        }

        self.rebuild_board();
        self.round = round;

        if self.all_delivered() {
            self.status = SimStatus::Finished;
        } else if self.round >= self.config.end_round() {
            self.status = SimStatus::Unfinished;
        }
        debug!(round = round.0, status = %self.status, "round played");
        Some(report)
    }

    /// Final reporting hook.  Logs the outcome; does not change state.
    pub fn terminate(&self) {
        let view = self.view();
        info!(
            round     = self.round.0,
            status    = %self.status,
            delivered = view.delivered(),
            remaining = view.remaining(),
            "simulation ended"
        );
    }

    /// Run from the current state until the simulation stops.
    ///
    /// Starts an `Idle` simulation first.  Calls observer hooks at every round
    /// boundary; use [`NoopObserver`][crate::NoopObserver] if you don't need
    /// callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimStatus {
        if self.status == SimStatus::Idle {
            self.start();
        }
        observer.on_sim_start(&self.view());

        while self.status == SimStatus::Running {
            observer.on_round_start(self.round.next());
            let Some(report) = self.simulate_round() else {
                break;
            };
            let view = self.view();
            observer.on_round_end(&report, &view);
            if self.round.is_multiple_of(self.config.output_interval_rounds) {
                observer.on_snapshot(self.round, &view);
            }
        }

        self.terminate();
        observer.on_sim_end(self.round, self.status);
        self.status
    }

    // ── Board ─────────────────────────────────────────────────────────────

    /// Recompute occupancy from scratch: undelivered parcels (a parcel being
    /// grabbed keeps its floor cell), every forklift, and trucks at the dock.
    fn rebuild_board(&mut self) {
        self.board.clear();
        let parcels = self
            .parcels
            .iter()
            .filter(|p| p.occupies_cell())
            .map(|p| (p.position(), p.class().glyph()));
        let forklifts = self.forklifts.iter().map(|f| (f.position(), Forklift::GLYPH));
        let trucks = self
            .trucks
            .iter()
            .filter(|t| t.is_available())
            .map(|t| (t.position(), Truck::GLYPH));

        for (position, glyph) in parcels.chain(forklifts).chain(trucks) {
            if let Err(err) = self.board.occupy(position, glyph) {
                warn!(%position, %err, "actor outside the board");
            }
        }
    }
}
