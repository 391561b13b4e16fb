//! Shared simulation state lent to one actor for one step.

use wh_core::Round;
use wh_spatial::{Board, PathFinder};

use crate::{Parcel, Truck};

/// Mutable borrows of everything a forklift may read or change during its
/// step.
///
/// Built by the orchestrator from split borrows of its own fields.  The
/// forklift collection itself is not part of the context: the forklift being
/// stepped is borrowed separately, and other forklifts are only visible
/// through the cells they block on `board`.
pub struct RoundContext<'a, P: PathFinder + ?Sized> {
    /// Round being played.
    pub round: Round,

    /// Occupancy grid.  Updated in place as forklifts move.
    pub board: &'a mut Board,

    /// All parcels, indexed by `ParcelId`.
    pub parcels: &'a mut [Parcel],

    /// All trucks, indexed by `TruckId`.
    pub trucks: &'a mut [Truck],

    /// Search engine used for every route.
    pub pathfinder: &'a P,
}

impl<'a, P: PathFinder + ?Sized> RoundContext<'a, P> {
    #[inline]
    pub fn new(
        round:      Round,
        board:      &'a mut Board,
        parcels:    &'a mut [Parcel],
        trucks:     &'a mut [Truck],
        pathfinder: &'a P,
    ) -> Self {
        Self { round, board, parcels, trucks, pathfinder }
    }
}
