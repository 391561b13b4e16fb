use thiserror::Error;
use wh_spatial::SpatialError;

/// Recoverable conditions raised while an actor plays its round.
///
/// None of these ever escape a round: the actor logs the error and skips its
/// action, then retries on the next round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("forklift already carries a parcel")]
    AlreadyLoaded,

    #[error("forklift carries no parcel")]
    NothingCarried,

    #[error("truck {truck} is full: {load} + {weight} exceeds {capacity}")]
    TruckFull {
        truck:    String,
        load:     u32,
        weight:   u32,
        capacity: u32,
    },

    #[error("no parcel available")]
    NoParcelAvailable,

    #[error("no truck available")]
    NoTruckAvailable,

    #[error("target unreachable: {0}")]
    Unreachable(#[from] SpatialError),

    #[error("target is no longer valid")]
    InvalidTarget,

    #[error("{entity} cannot go from {from} to {to}")]
    InvalidTransition {
        entity: String,
        from:   &'static str,
        to:     &'static str,
    },
}

pub type ActionResult<T> = Result<T, ActionError>;
