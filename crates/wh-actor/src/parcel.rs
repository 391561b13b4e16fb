//! Parcels and their lifecycle.
//!
//! ```text
//! StandingBy ──reserve──► Targeted ──pick_up──► Carried ──drop_off──► DroppedOff
//!     ▲                      │
//!     └──────release─────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use wh_core::Vector;

use crate::{ActionError, ActionResult};

// ── WeightClass ───────────────────────────────────────────────────────────────

/// The colour a parcel is declared with, which fixes its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightClass {
    Yellow,
    Green,
    Blue,
}

impl WeightClass {
    #[inline]
    pub const fn weight(self) -> u32 {
        match self {
            WeightClass::Yellow => 100,
            WeightClass::Green  => 200,
            WeightClass::Blue   => 500,
        }
    }

    /// Upper-case name, as printed in action lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            WeightClass::Yellow => "YELLOW",
            WeightClass::Green  => "GREEN",
            WeightClass::Blue   => "BLUE",
        }
    }

    /// Character drawn for a parcel of this class on the board.
    pub const fn glyph(self) -> char {
        match self {
            WeightClass::Yellow => '1',
            WeightClass::Green  => '2',
            WeightClass::Blue   => '3',
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parcel colour `{0}`")]
pub struct UnknownWeightClass(pub String);

impl FromStr for WeightClass {
    type Err = UnknownWeightClass;

    /// Case-insensitive colour name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [WeightClass::Yellow, WeightClass::Green, WeightClass::Blue]
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownWeightClass(s.to_owned()))
    }
}

// ── ParcelStatus ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParcelStatus {
    /// Waiting on the floor, free to be claimed.
    #[default]
    StandingBy,
    /// Reserved by exactly one forklift.
    Targeted,
    /// Riding on a forklift.
    Carried,
    /// Inside a truck.  Terminal.
    DroppedOff,
}

impl ParcelStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ParcelStatus::StandingBy => "STANDING_BY",
            ParcelStatus::Targeted   => "TARGETED",
            ParcelStatus::Carried    => "CARRIED",
            ParcelStatus::DroppedOff => "DROPPED_OFF",
        }
    }
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Parcel ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    pub(crate) name:     String,
    pub(crate) position: Vector,
    pub(crate) class:    WeightClass,
    pub(crate) status:   ParcelStatus,
}

impl Parcel {
    pub fn new(name: impl Into<String>, position: Vector, class: WeightClass) -> Self {
        Self {
            name: name.into(),
            position,
            class,
            status: ParcelStatus::StandingBy,
        }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn position(&self) -> Vector { self.position }
    #[inline] pub fn class(&self) -> WeightClass { self.class }
    #[inline] pub fn status(&self) -> ParcelStatus { self.status }
    #[inline] pub fn weight(&self) -> u32 { self.class.weight() }

    /// Free to be claimed by a forklift.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == ParcelStatus::StandingBy
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.status == ParcelStatus::DroppedOff
    }

    /// Blocks the cell at [`position`][Self::position].
    ///
    /// A `Carried` parcel still counts: until the grab completes it sits on
    /// the floor, and afterwards it shares its forklift's cell.
    #[inline]
    pub fn occupies_cell(&self) -> bool {
        !self.is_delivered()
    }

    pub(crate) fn reserve(&mut self) -> ActionResult<()> {
        self.transition(ParcelStatus::StandingBy, ParcelStatus::Targeted)
    }

    /// Undo a reservation.  No-op unless the parcel is `Targeted`.
    pub(crate) fn release(&mut self) {
        if self.status == ParcelStatus::Targeted {
            self.status = ParcelStatus::StandingBy;
        }
    }

    pub(crate) fn pick_up(&mut self) -> ActionResult<()> {
        self.transition(ParcelStatus::Targeted, ParcelStatus::Carried)
    }

    pub(crate) fn drop_off(&mut self) -> ActionResult<()> {
        self.transition(ParcelStatus::Carried, ParcelStatus::DroppedOff)
    }

    fn transition(&mut self, from: ParcelStatus, to: ParcelStatus) -> ActionResult<()> {
        if self.status != from {
            return Err(ActionError::InvalidTransition {
                entity: self.name.clone(),
                from:   self.status.as_str(),
                to:     to.as_str(),
            });
        }
        self.status = to;
        Ok(())
    }
}
