//! What each actor did in a round.

use std::fmt;

use wh_core::{ParcelId, Vector};

use crate::TruckStatus;

/// The visible outcome of one forklift step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForkliftAction {
    /// Did nothing this round.
    Wait,
    /// Moved onto the given cell.
    Go(Vector),
    /// Started picking up a parcel.
    Take(ParcelId),
    /// Started depositing its parcel into a truck.
    Leave(ParcelId),
}

impl fmt::Display for ForkliftAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForkliftAction::Wait          => f.write_str("WAIT"),
            ForkliftAction::Go(pos)       => write!(f, "GO {pos}"),
            ForkliftAction::Take(parcel)  => write!(f, "TAKE {parcel}"),
            ForkliftAction::Leave(parcel) => write!(f, "LEAVE {parcel}"),
        }
    }
}

/// A truck's state at the end of its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckReport {
    pub status:   TruckStatus,
    pub load:     u32,
    pub capacity: u32,
}

impl fmt::Display for TruckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.status {
            TruckStatus::Loading => "WAITING",
            TruckStatus::Away    => "GONE",
        };
        write!(f, "{word} {}/{}", self.load, self.capacity)
    }
}
