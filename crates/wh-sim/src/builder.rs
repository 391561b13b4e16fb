//! Fluent builder for constructing a [`Simulation`].

use wh_actor::{Forklift, Parcel, Truck};
use wh_core::SimConfig;
use wh_spatial::{Board, PathFinder};

use crate::{validate, EntityKind, SimError, SimResult, Simulation, WorldSnapshot};

/// Fluent builder for [`Simulation<R>`].
///
/// # Required inputs
///
/// - [`WorldSnapshot`]: dimensions, round budget and entities
/// - `R: PathFinder`: the search engine (e.g. [`wh_spatial::AStar`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                           |
/// |----------------|---------------------------------------------------|
/// | `.config(c)`   | `SimConfig::with_budget(snapshot.max_rounds)`     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(snapshot, AStar::new())
///     .config(SimConfig { max_rounds: 500, output_interval_rounds: 10 })
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: PathFinder> {
    snapshot:   WorldSnapshot,
    pathfinder: R,
    config:     Option<SimConfig>,
}

impl<R: PathFinder> SimBuilder<R> {
    pub fn new(snapshot: WorldSnapshot, pathfinder: R) -> Self {
        Self { snapshot, pathfinder, config: None }
    }

    /// Override the configuration derived from the snapshot.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the snapshot and return an `Idle` simulation.
    pub fn build(self) -> SimResult<Simulation<R>> {
        let config = self
            .config
            .unwrap_or_else(|| SimConfig::with_budget(self.snapshot.max_rounds));
        if config.max_rounds == 0 {
            return Err(SimError::ZeroRoundBudget);
        }
        validate(&self.snapshot)?;

        let snapshot = self.snapshot;
        check_count(snapshot.parcels.len(), EntityKind::Parcel)?;
        check_count(snapshot.forklifts.len(), EntityKind::Forklift)?;
        check_count(snapshot.trucks.len(), EntityKind::Truck)?;

        let parcels = snapshot
            .parcels
            .into_iter()
            .map(|p| Parcel::new(p.name, p.position, p.class))
            .collect();
        let forklifts = snapshot
            .forklifts
            .into_iter()
            .map(|f| Forklift::new(f.name, f.position))
            .collect();
        let trucks = snapshot
            .trucks
            .into_iter()
            .map(|t| Truck::new(t.name, t.position, t.capacity, t.away_duration))
            .collect();

        Ok(Simulation::assemble(
            config,
            Board::new(snapshot.width, snapshot.height),
            parcels,
            forklifts,
            trucks,
            self.pathfinder,
        ))
    }
}

/// Ids are `u32` indices.
fn check_count(len: usize, kind: EntityKind) -> SimResult<()> {
    u32::try_from(len).map(|_| ()).map_err(|_| SimError::TooManyEntities(kind))
}
