use std::fmt;

use thiserror::Error;
use wh_core::Vector;

/// The three kinds of entity a world snapshot declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Parcel,
    Forklift,
    Truck,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Parcel   => "parcel",
            EntityKind::Forklift => "forklift",
            EntityKind::Truck    => "truck",
        })
    }
}

/// Fatal errors raised while building a simulation from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("round budget must be at least 1")]
    ZeroRoundBudget,

    #[error("at least one forklift is required")]
    NoForklift,

    #[error("at least one truck is required")]
    NoTruck,

    #[error("warehouse {width}x{height} is too small, at least 2 cells are required")]
    TooSmallWarehouse { width: u32, height: u32 },

    #[error("{kind} `{name}` at {position} is outside the warehouse")]
    OutOfBounds {
        kind:     EntityKind,
        name:     String,
        position: Vector,
    },

    #[error("trucks not on a side of the warehouse: {}", .0.join(", "))]
    TrucksOffBoundary(Vec<String>),

    #[error("`{first}` and `{second}` are stacked on {position}")]
    StackedEntities {
        position: Vector,
        first:    String,
        second:   String,
    },

    #[error("name `{0}` is used by more than one entity")]
    DuplicateName(String),

    #[error("too many {0} entities")]
    TooManyEntities(EntityKind),
}

pub type SimResult<T> = Result<T, SimError>;
