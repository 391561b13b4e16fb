//! Integration tests for wh-sim.

use rustc_hash::FxHashMap;
use wh_actor::ParcelStatus;
use wh_actor::WeightClass::{self, Blue, Green, Yellow};
use wh_core::{Round, SimConfig, Vector};

use crate::{RoundReport, SimObserver, SimStatus, Simulation, WorldSnapshot, WorldView};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn v(x: i32, y: i32) -> Vector {
    Vector::new(x, y)
}

/// 6×3 floor, one forklift, one green parcel, one truck.  Delivered in
/// exactly 7 rounds.
fn single_delivery(max_rounds: u64) -> WorldSnapshot {
    WorldSnapshot::new(6, 3, max_rounds)
        .with_parcel("box", 2, 1, Green)
        .with_forklift("lift", 0, 1)
        .with_truck("van", 5, 1, 1000, 2)
}

/// 8×6 floor, two forklifts, five parcels, two trucks.  The blue parcel only
/// fits the big truck once it has come back empty, so this world exercises
/// a full departure and return.  Finishes in 22 rounds.
fn busy_warehouse() -> WorldSnapshot {
    WorldSnapshot::new(8, 6, 300)
        .with_parcel("p0", 2, 1, Yellow)
        .with_parcel("p1", 3, 4, Green)
        .with_parcel("p2", 5, 2, Blue)
        .with_parcel("p3", 1, 3, Yellow)
        .with_parcel("p4", 6, 4, Green)
        .with_forklift("f0", 0, 0)
        .with_forklift("f1", 0, 5)
        .with_truck("t0", 7, 1, 500, 3)
        .with_truck("t1", 7, 4, 300, 2)
}

/// 3×2 floor where both forklifts grab on round 1 and f0's shortest way to
/// the truck runs through the cell f1 is still lifting from.
///
/// ```text
/// f1 p1 t0
///  . f0 p0
/// ```
fn crossing_grab() -> WorldSnapshot {
    WorldSnapshot::new(3, 2, 60)
        .with_parcel("p0", 2, 1, Green)
        .with_parcel("p1", 1, 0, Green)
        .with_forklift("f0", 1, 1)
        .with_forklift("f1", 0, 0)
        .with_truck("t0", 2, 0, 1000, 2)
}

fn started(snapshot: WorldSnapshot) -> Simulation {
    let mut sim = Simulation::from_snapshot(snapshot).unwrap();
    sim.start();
    sim
}

/// Records every callback and checks the world invariants after each round.
#[derive(Default)]
struct Recorder {
    starts:       usize,
    round_starts: Vec<Round>,
    reports:      Vec<RoundReport>,
    snapshots:    Vec<Round>,
    end:          Option<(Round, SimStatus)>,
    parcels:      Vec<ParcelStatus>,
}

/// Lifecycle order; `StandingBy` and `Targeted` may swap back and forth.
fn stage(status: ParcelStatus) -> u8 {
    match status {
        ParcelStatus::StandingBy | ParcelStatus::Targeted => 0,
        ParcelStatus::Carried => 1,
        ParcelStatus::DroppedOff => 2,
    }
}

/// Panics if two entities hold the same cell.  A lifted parcel rides on its
/// forklift and is not counted separately.
fn assert_cells_distinct(world: &WorldView<'_>) {
    let lifted: Vec<_> = world.forklifts.iter().filter_map(|f| f.carried()).collect();
    let forklifts = world.forklifts.iter().map(|f| (f.position(), f.name()));
    let parcels = world
        .parcels
        .iter()
        .enumerate()
        .filter(|(i, p)| p.occupies_cell() && !lifted.iter().any(|id| id.index() == *i))
        .map(|(_, p)| (p.position(), p.name()));
    let trucks = world
        .trucks
        .iter()
        .filter(|t| t.is_available())
        .map(|t| (t.position(), t.name()));

    let mut cells: FxHashMap<Vector, &str> = FxHashMap::default();
    for (position, name) in forklifts.chain(parcels).chain(trucks) {
        if let Some(other) = cells.insert(position, name) {
            panic!("{}: {other} and {name} share {position}", world.round);
        }
    }
}

impl SimObserver for Recorder {
    fn on_sim_start(&mut self, world: &WorldView<'_>) {
        self.starts += 1;
        self.parcels = world.parcels.iter().map(|p| p.status()).collect();
        assert_cells_distinct(world);
    }

    fn on_round_start(&mut self, round: Round) {
        self.round_starts.push(round);
    }

    fn on_round_end(&mut self, report: &RoundReport, world: &WorldView<'_>) {
        for truck in world.trucks {
            assert!(truck.load() <= truck.capacity(), "{} overloaded", truck.name());
            assert!(truck.committed() <= truck.capacity(), "{} overcommitted", truck.name());
        }
        assert_cells_distinct(world);
        for (before, parcel) in self.parcels.iter_mut().zip(world.parcels) {
            assert!(
                stage(parcel.status()) >= stage(*before),
                "{} went from {} back to {}",
                parcel.name(),
                before.as_str(),
                parcel.status().as_str()
            );
            *before = parcel.status();
        }
        self.reports.push(report.clone());
    }

    fn on_snapshot(&mut self, round: Round, _world: &WorldView<'_>) {
        self.snapshots.push(round);
    }

    fn on_sim_end(&mut self, final_round: Round, status: SimStatus) {
        self.end = Some((final_round, status));
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;
    use crate::{EntityKind, SimBuilder, SimError};
    use wh_spatial::AStar;

    fn build(snapshot: WorldSnapshot) -> Result<Simulation, SimError> {
        Simulation::from_snapshot(snapshot)
    }

    #[test]
    fn valid_world_builds_idle() {
        let sim = build(single_delivery(10)).unwrap();
        assert_eq!(sim.status(), SimStatus::Idle);
        assert_eq!(sim.round(), Round::ZERO);
        assert_eq!(sim.config().max_rounds, 10);
    }

    #[test]
    fn requires_forklift() {
        let world = WorldSnapshot::new(4, 4, 10).with_truck("t", 0, 0, 100, 1);
        assert_eq!(build(world).err(), Some(SimError::NoForklift));
    }

    #[test]
    fn requires_truck() {
        let world = WorldSnapshot::new(4, 4, 10).with_forklift("f", 1, 1);
        assert_eq!(build(world).err(), Some(SimError::NoTruck));
    }

    #[test]
    fn rejects_single_cell_warehouse() {
        let world = WorldSnapshot::new(1, 1, 10)
            .with_forklift("f", 0, 0)
            .with_truck("t", 0, 0, 100, 1);
        assert_eq!(
            build(world).err(),
            Some(SimError::TooSmallWarehouse { width: 1, height: 1 })
        );
    }

    #[test]
    fn rejects_out_of_bounds() {
        let world = single_delivery(10).with_parcel("lost", 2, 3, Yellow);
        match build(world).err() {
            Some(SimError::OutOfBounds { kind, name, position }) => {
                assert_eq!(kind, EntityKind::Parcel);
                assert_eq!(name, "lost");
                assert_eq!(position, v(2, 3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_coordinates() {
        let world = single_delivery(10).with_forklift("ghost", -1, 0);
        assert!(matches!(build(world), Err(SimError::OutOfBounds { kind: EntityKind::Forklift, .. })));
    }

    #[test]
    fn reports_every_truck_off_the_side() {
        let world = WorldSnapshot::new(5, 5, 10)
            .with_forklift("f", 0, 0)
            .with_truck("a", 2, 2, 100, 1)
            .with_truck("b", 4, 2, 100, 1)
            .with_truck("c", 1, 3, 100, 1);
        match build(world).err() {
            Some(SimError::TrucksOffBoundary(trucks)) => {
                assert_eq!(trucks, vec!["a at [2,2]".to_owned(), "c at [1,3]".to_owned()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn accepts_trucks_on_every_side() {
        let world = WorldSnapshot::new(4, 3, 10)
            .with_forklift("f", 1, 1)
            .with_truck("west", 0, 1, 100, 1)
            .with_truck("east", 3, 1, 100, 1)
            .with_truck("north", 1, 0, 100, 1)
            .with_truck("south", 2, 2, 100, 1)
            .with_truck("corner", 3, 2, 100, 1);
        assert!(build(world).is_ok());
    }

    #[test]
    fn rejects_stacked_entities() {
        let world = single_delivery(10).with_parcel("under", 0, 1, Yellow);
        assert_eq!(
            build(world).err(),
            Some(SimError::StackedEntities {
                position: v(0, 1),
                first:    "under".to_owned(),
                second:   "lift".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let world = single_delivery(10).with_forklift("box", 0, 0);
        assert_eq!(build(world).err(), Some(SimError::DuplicateName("box".to_owned())));
    }

    #[test]
    fn rejects_zero_budget() {
        let result = SimBuilder::new(single_delivery(10), AStar::new())
            .config(SimConfig { max_rounds: 0, output_interval_rounds: 1 })
            .build();
        assert_eq!(result.err(), Some(SimError::ZeroRoundBudget));
    }

    #[test]
    fn config_overrides_snapshot_budget() {
        let sim = SimBuilder::new(single_delivery(10), AStar::new())
            .config(SimConfig::with_budget(3))
            .build()
            .unwrap();
        assert_eq!(sim.config().max_rounds, 3);
    }

    #[test]
    fn initial_board_marks_every_actor() {
        let sim = build(single_delivery(10)).unwrap();
        let board = sim.board();
        assert_eq!(board.blocked_count(), 3);
        assert_eq!(board.cell(v(2, 1)).unwrap().glyph, Some(WeightClass::Green.glyph()));
        assert_eq!(board.cell(v(0, 1)).unwrap().glyph, Some('L'));
        assert_eq!(board.cell(v(5, 1)).unwrap().glyph, Some('T'));
    }
}

// ── Round loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rounds {
    use super::*;
    use wh_actor::{ForkliftAction, ParcelStatus, TruckStatus};
    use wh_core::{ForkliftId, ParcelId, TruckId};

    #[test]
    fn idle_simulation_does_not_play() {
        let mut sim = Simulation::from_snapshot(single_delivery(10)).unwrap();
        assert!(sim.simulate_round().is_none());
        assert_eq!(sim.round(), Round::ZERO);
        assert_eq!(sim.status(), SimStatus::Idle);
    }

    #[test]
    fn single_delivery_finishes_in_seven_rounds() {
        let mut sim = started(single_delivery(100));
        let mut last = None;
        while let Some(report) = sim.simulate_round() {
            last = Some(report);
        }
        assert_eq!(sim.status(), SimStatus::Finished);
        assert_eq!(sim.round(), Round(7));
        assert!(sim.all_delivered());

        let last = last.unwrap();
        assert_eq!(last.round, Round(7));
        assert_eq!(last.forklifts, vec![(ForkliftId(0), ForkliftAction::Wait)]);
        let (id, truck) = last.trucks[0];
        assert_eq!(id, TruckId(0));
        assert_eq!(truck.status, TruckStatus::Away);
        assert_eq!(truck.load, 200);
    }

    #[test]
    fn first_rounds_of_single_delivery() {
        let mut sim = started(single_delivery(100));
        let actions: Vec<ForkliftAction> = (0..3)
            .map(|_| sim.simulate_round().unwrap().forklifts[0].1)
            .collect();
        assert_eq!(
            actions,
            vec![
                ForkliftAction::Go(v(1, 1)),
                ForkliftAction::Take(ParcelId(0)),
                ForkliftAction::Go(v(2, 1)),
            ]
        );
        assert_eq!(sim.parcels()[0].status(), ParcelStatus::Carried);
        assert_eq!(sim.parcels()[0].position(), v(2, 1));
        // The forklift's glyph covers the parcel it carries.
        assert_eq!(sim.board().cell(v(2, 1)).unwrap().glyph, Some('L'));
    }

    #[test]
    fn parcel_blocks_its_cell_until_lifted() {
        let mut sim = started(single_delivery(100));
        sim.simulate_round().unwrap();
        let take = sim.simulate_round().unwrap();
        assert_eq!(take.forklifts[0].1, ForkliftAction::Take(ParcelId(0)));
        assert_eq!(sim.parcels()[0].status(), ParcelStatus::Carried);

        let floor = sim.board().cell(v(2, 1)).unwrap();
        assert!(floor.blocked);
        assert_eq!(floor.glyph, Some(WeightClass::Green.glyph()));
    }

    #[test]
    fn budget_exhaustion_is_unfinished() {
        let mut sim = started(single_delivery(3));
        for _ in 0..2 {
            sim.simulate_round().unwrap();
            assert_eq!(sim.status(), SimStatus::Running);
        }
        sim.simulate_round().unwrap();
        assert_eq!(sim.status(), SimStatus::Unfinished);
        assert_eq!(sim.round(), Round(3));

        // Further calls change nothing.
        let before = sim.forklifts()[0].clone();
        assert!(sim.simulate_round().is_none());
        assert_eq!(sim.round(), Round(3));
        assert_eq!(sim.forklifts()[0], before);
    }

    #[test]
    fn last_delivery_wins_over_budget() {
        let mut sim = started(single_delivery(7));
        while sim.simulate_round().is_some() {}
        assert_eq!(sim.status(), SimStatus::Finished);
        assert_eq!(sim.round(), Round(7));
    }

    #[test]
    fn finished_is_stable() {
        let mut sim = started(single_delivery(100));
        while sim.simulate_round().is_some() {}
        let trucks = sim.trucks().to_vec();
        for _ in 0..3 {
            assert!(sim.simulate_round().is_none());
        }
        assert_eq!(sim.status(), SimStatus::Finished);
        assert_eq!(sim.round(), Round(7));
        assert_eq!(sim.trucks(), trucks.as_slice());
    }

    #[test]
    fn world_without_parcels_finishes_at_once() {
        let world = WorldSnapshot::new(3, 3, 10)
            .with_forklift("f", 1, 1)
            .with_truck("t", 0, 0, 100, 1);
        let mut sim = started(world);
        assert!(sim.simulate_round().is_none());
        assert_eq!(sim.status(), SimStatus::Finished);
        assert_eq!(sim.round(), Round::ZERO);
    }

    #[test]
    fn away_truck_frees_its_cell() {
        let mut sim = started(single_delivery(100));
        while sim.simulate_round().is_some() {}
        assert_eq!(sim.trucks()[0].status(), TruckStatus::Away);
        assert!(!sim.board().is_blocked(v(5, 1)));
    }

    #[test]
    fn start_resets_round_counter() {
        let mut sim = started(single_delivery(100));
        sim.simulate_round();
        sim.simulate_round();
        sim.start();
        assert_eq!(sim.round(), Round::ZERO);
        assert_eq!(sim.status(), SimStatus::Running);
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runs {
    use super::*;
    use wh_actor::{ForkliftAction, TruckStatus};
    use wh_core::ParcelId;

    #[test]
    fn run_calls_every_hook() {
        let mut sim = Simulation::from_snapshot(single_delivery(100)).unwrap();
        let mut rec = Recorder::default();
        let status = sim.run(&mut rec);

        assert_eq!(status, SimStatus::Finished);
        assert_eq!(rec.starts, 1);
        assert_eq!(rec.reports.len(), 7);
        assert_eq!(rec.round_starts, (1..=7).map(Round).collect::<Vec<_>>());
        assert_eq!(rec.snapshots.len(), 7);
        assert_eq!(rec.end, Some((Round(7), SimStatus::Finished)));
    }

    #[test]
    fn snapshot_interval_is_honoured() {
        let mut sim = crate::SimBuilder::new(single_delivery(100), wh_spatial::AStar::new())
            .config(SimConfig { max_rounds: 100, output_interval_rounds: 3 })
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.snapshots, vec![Round(3), Round(6)]);
    }

    #[test]
    fn busy_warehouse_delivers_everything() {
        let mut sim = Simulation::from_snapshot(busy_warehouse()).unwrap();
        let mut rec = Recorder::default();
        assert_eq!(sim.run(&mut rec), SimStatus::Finished);
        assert_eq!(sim.round(), Round(22));
        assert!(sim.all_delivered());
        assert_eq!(sim.view().delivered(), 5);
        assert_eq!(sim.view().remaining(), 0);

        // Both forklifts grab their nearest parcel on round 3.
        let r3 = &rec.reports[2];
        assert_eq!(r3.forklifts[0].1, ForkliftAction::Take(ParcelId(0)));
        assert_eq!(r3.forklifts[1].1, ForkliftAction::Take(ParcelId(3)));

        // The small truck fills up, leaves on round 16 and is back on 18.
        assert_eq!(rec.reports[15].trucks[1].1.status, TruckStatus::Away);
        assert_eq!(rec.reports[15].trucks[1].1.load, 300);
        assert_eq!(rec.reports[17].trucks[1].1.status, TruckStatus::Loading);

        // The blue parcel waits for the big truck to come back empty.
        assert_eq!(rec.reports[18].trucks[0].1.status, TruckStatus::Loading);
        assert_eq!(rec.reports[20].forklifts[0].1, ForkliftAction::Leave(ParcelId(2)));
        assert_eq!(rec.reports[21].trucks[0].1.load, 500);
    }

    #[test]
    fn grabbed_parcel_cell_is_not_entered() {
        let mut sim = Simulation::from_snapshot(crossing_grab()).unwrap();
        let mut rec = Recorder::default();
        assert_eq!(sim.run(&mut rec), SimStatus::Finished);
        assert_eq!(sim.round(), Round(4));

        let r1 = &rec.reports[0];
        assert_eq!(r1.forklifts[0].1, ForkliftAction::Take(ParcelId(0)));
        assert_eq!(r1.forklifts[1].1, ForkliftAction::Take(ParcelId(1)));

        // f0 goes around through its own parcel's cell, not f1's.
        let r2 = &rec.reports[1];
        assert_eq!(r2.forklifts[0].1, ForkliftAction::Go(v(2, 1)));
        assert_eq!(r2.forklifts[1].1, ForkliftAction::Go(v(1, 0)));

        let r3 = &rec.reports[2];
        assert_eq!(r3.forklifts[0].1, ForkliftAction::Leave(ParcelId(0)));
        assert_eq!(r3.forklifts[1].1, ForkliftAction::Leave(ParcelId(1)));

        let (_, truck) = rec.reports[3].trucks[0];
        assert_eq!(truck.status, TruckStatus::Away);
        assert_eq!(truck.load, 400);
    }

    #[test]
    fn runs_are_deterministic() {
        let play = || {
            let mut sim = Simulation::from_snapshot(busy_warehouse()).unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec);
            rec.reports
        };
        assert_eq!(play(), play());
    }
}
