//! Per-round results and the read-only world view handed to observers.

use wh_actor::{Forklift, ForkliftAction, Parcel, Truck, TruckReport};
use wh_core::{ForkliftId, ParcelId, Round, TruckId};
use wh_spatial::Board;

use crate::SimStatus;

/// Everything the actors did in one round, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub round:     Round,
    pub forklifts: Vec<(ForkliftId, ForkliftAction)>,
    pub trucks:    Vec<(TruckId, TruckReport)>,
}

impl RoundReport {
    pub(crate) fn new(round: Round) -> Self {
        Self { round, forklifts: Vec::new(), trucks: Vec::new() }
    }
}

/// Borrowed, read-only view of the whole simulation.
///
/// This is the only thing renderers and output writers see; it exposes no
/// way to mutate state.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    pub round:     Round,
    pub status:    SimStatus,
    pub board:     &'a Board,
    pub parcels:   &'a [Parcel],
    pub forklifts: &'a [Forklift],
    pub trucks:    &'a [Truck],
}

impl<'a> WorldView<'a> {
    #[inline]
    pub fn parcel(&self, id: ParcelId) -> Option<&'a Parcel> {
        self.parcels.get(id.index())
    }

    #[inline]
    pub fn forklift(&self, id: ForkliftId) -> Option<&'a Forklift> {
        self.forklifts.get(id.index())
    }

    #[inline]
    pub fn truck(&self, id: TruckId) -> Option<&'a Truck> {
        self.trucks.get(id.index())
    }

    /// Parcels already inside a truck.
    pub fn delivered(&self) -> usize {
        self.parcels.iter().filter(|p| p.is_delivered()).count()
    }

    /// Parcels not yet delivered.
    pub fn remaining(&self) -> usize {
        self.parcels.len() - self.delivered()
    }
}
