//! Snapshot validation.
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. at least one forklift, at least one truck
//! 2. warehouse has at least two cells
//! 3. every entity inside the warehouse
//! 4. every truck on a boundary cell (all offenders reported together)
//! 5. no two entities on one cell
//! 6. no two entities with one name

use rustc_hash::{FxHashMap, FxHashSet};
use wh_core::Vector;
use wh_spatial::Board;

use crate::{SimError, SimResult, WorldSnapshot};

pub fn validate(snapshot: &WorldSnapshot) -> SimResult<()> {
    if snapshot.forklifts.is_empty() {
        return Err(SimError::NoForklift);
    }
    if snapshot.trucks.is_empty() {
        return Err(SimError::NoTruck);
    }

    let (width, height) = (snapshot.width, snapshot.height);
    if u64::from(width) * u64::from(height) < 2 {
        return Err(SimError::TooSmallWarehouse { width, height });
    }

    let board = Board::new(width, height);
    if let Some((kind, name, position)) =
        snapshot.entities().find(|&(_, _, pos)| !board.contains(pos))
    {
        return Err(SimError::OutOfBounds { kind, name: name.to_owned(), position });
    }

    let off_side: Vec<String> = snapshot
        .trucks
        .iter()
        .filter(|t| !board.is_on_boundary(t.position))
        .map(|t| format!("{} at {}", t.name, t.position))
        .collect();
    if !off_side.is_empty() {
        return Err(SimError::TrucksOffBoundary(off_side));
    }

    let mut cells: FxHashMap<Vector, &str> = FxHashMap::default();
    for (_, name, position) in snapshot.entities() {
        if let Some(first) = cells.insert(position, name) {
            return Err(SimError::StackedEntities {
                position,
                first:  first.to_owned(),
                second: name.to_owned(),
            });
        }
    }

    let mut names: FxHashSet<&str> = FxHashSet::default();
    for (_, name, _) in snapshot.entities() {
        if !names.insert(name) {
            return Err(SimError::DuplicateName(name.to_owned()));
        }
    }

    Ok(())
}
