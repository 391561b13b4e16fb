//! Simulation observer trait for progress reporting and data collection.

use wh_core::Round;

use crate::{RoundReport, SimStatus, WorldView};

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the round loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_round_end(&mut self, report: &RoundReport, world: &WorldView<'_>) {
///         println!("{}: {} parcels left", report.round, world.remaining());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first round, with the initial world.
    fn on_sim_start(&mut self, _world: &WorldView<'_>) {}

    /// Called before each round is played.
    fn on_round_start(&mut self, _round: Round) {}

    /// Called after each round with what every actor did and the resulting
    /// world.
    fn on_round_end(&mut self, _report: &RoundReport, _world: &WorldView<'_>) {}

    /// Called at snapshot intervals (every `config.output_interval_rounds`
    /// rounds), after `on_round_end`.
    fn on_snapshot(&mut self, _round: Round, _world: &WorldView<'_>) {}

    /// Called once when the simulation stops.
    fn on_sim_end(&mut self, _final_round: Round, _status: SimStatus) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_sim_start(&mut self, world: &WorldView<'_>) {
        (**self).on_sim_start(world)
    }

    fn on_round_start(&mut self, round: Round) {
        (**self).on_round_start(round)
    }

    fn on_round_end(&mut self, report: &RoundReport, world: &WorldView<'_>) {
        (**self).on_round_end(report, world)
    }

    fn on_snapshot(&mut self, round: Round, world: &WorldView<'_>) {
        (**self).on_snapshot(round, world)
    }

    fn on_sim_end(&mut self, final_round: Round, status: SimStatus) {
        (**self).on_sim_end(final_round, status)
    }
}
