//! Trucks: load at the dock, leave when there is nothing more to wait for,
//! come back empty after a fixed number of rounds.

use std::fmt;

use tracing::{debug, info};
use wh_core::Vector;
use wh_spatial::Board;

use crate::{find_closest_parcel, ActionError, ActionResult, Parcel, TruckReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TruckStatus {
    /// Parked at the dock, accepting parcels.
    #[default]
    Loading,
    /// Delivering.  Off the board.
    Away,
}

impl TruckStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TruckStatus::Loading => "LOADING",
            TruckStatus::Away    => "AWAY",
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery truck parked on the warehouse boundary.
///
/// `load` counts parcels physically inside; `committed` additionally counts
/// parcels forklifts have reserved room for.  `load <= committed <= capacity`
/// holds between rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Truck {
    pub(crate) name:           String,
    pub(crate) position:       Vector,
    pub(crate) capacity:       u32,
    pub(crate) load:           u32,
    pub(crate) committed:      u32,
    pub(crate) status:         TruckStatus,
    pub(crate) away_duration:  u32,
    pub(crate) away_remaining: u32,
}

impl Truck {
    pub const GLYPH: char = 'T';

    pub fn new(name: impl Into<String>, position: Vector, capacity: u32, away_duration: u32) -> Self {
        Self {
            name: name.into(),
            position,
            capacity,
            load: 0,
            committed: 0,
            status: TruckStatus::Loading,
            away_duration,
            away_remaining: 0,
        }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn position(&self) -> Vector { self.position }
    #[inline] pub fn capacity(&self) -> u32 { self.capacity }
    #[inline] pub fn load(&self) -> u32 { self.load }
    #[inline] pub fn committed(&self) -> u32 { self.committed }
    #[inline] pub fn status(&self) -> TruckStatus { self.status }
    #[inline] pub fn away_duration(&self) -> u32 { self.away_duration }
    #[inline] pub fn away_remaining(&self) -> u32 { self.away_remaining }

    /// At the dock and able to receive parcels.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == TruckStatus::Loading
    }

    /// Room left once every outstanding reservation is delivered.
    #[inline]
    pub fn available_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.committed)
    }

    /// Whether a forklift carrying `weight` may reserve room in this truck.
    #[inline]
    pub fn can_accept(&self, weight: u32) -> bool {
        self.is_available() && self.available_capacity() >= weight
    }

    pub fn report(&self) -> TruckReport {
        TruckReport { status: self.status, load: self.load, capacity: self.capacity }
    }

    pub(crate) fn reserve(&mut self, weight: u32) -> ActionResult<()> {
        if !self.can_accept(weight) {
            return Err(self.full_error(self.committed, weight));
        }
        self.committed += weight;
        Ok(())
    }

    pub(crate) fn release(&mut self, weight: u32) {
        self.committed = self.committed.saturating_sub(weight);
    }

    /// Checks that a parcel of `weight` physically fits right now.
    pub(crate) fn check_drop(&self, weight: u32) -> ActionResult<()> {
        if !self.is_available() || self.load + weight > self.capacity {
            return Err(self.full_error(self.load, weight));
        }
        Ok(())
    }

    pub(crate) fn deposit(&mut self, weight: u32) -> ActionResult<()> {
        self.check_drop(weight)?;
        self.load += weight;
        Ok(())
    }

    fn full_error(&self, load: u32, weight: u32) -> ActionError {
        ActionError::TruckFull {
            truck:    self.name.clone(),
            load,
            weight,
            capacity: self.capacity,
        }
    }

    // ── Round ─────────────────────────────────────────────────────────────

    /// Plays one round and reports the resulting state.
    ///
    /// A loading truck departs once it carries something, every reservation
    /// on it has been delivered, and no parcel it could still take lies within
    /// `2 * away_duration` of the dock.  An away truck counts down and returns
    /// empty when the countdown ends, unless its dock cell is occupied.
    pub fn simulate_round(&mut self, parcels: &[Parcel], board: &mut Board) -> TruckReport {
        match self.status {
            TruckStatus::Loading => self.consider_departure(parcels),
            TruckStatus::Away    => self.count_down(board),
        }
        self.report()
    }

    fn consider_departure(&mut self, parcels: &[Parcel]) {
        if self.load == 0 || self.load != self.committed {
            return;
        }
        let room = self.available_capacity();
        let reach = 2.0 * self.away_duration as f32;
        let nearby = find_closest_parcel(parcels, self.position, |p| {
            p.is_available() && p.weight() <= room
        })
        .and_then(|id| parcels.get(id.index()))
        .is_some_and(|p| self.position.distance(p.position()) <= reach);

        if nearby {
            return;
        }
        self.status = TruckStatus::Away;
        self.away_remaining = self.away_duration;
        info!(truck = %self.name, load = self.load, capacity = self.capacity, "truck departs");
    }

    fn count_down(&mut self, board: &mut Board) {
        self.away_remaining = self.away_remaining.saturating_sub(1);
        if self.away_remaining > 0 {
            return;
        }
        if board.is_blocked(self.position) {
            debug!(truck = %self.name, position = %self.position, "dock occupied, return delayed");
            return;
        }
        if board.occupy(self.position, Self::GLYPH).is_err() {
            return;
        }
        self.status = TruckStatus::Loading;
        self.load = 0;
        self.committed = 0;
        info!(truck = %self.name, "truck back at dock");
    }
}
