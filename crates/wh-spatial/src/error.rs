//! Spatial-subsystem error type.

use thiserror::Error;

use wh_core::Vector;

/// Errors produced by `wh-spatial`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Vector, to: Vector },

    #[error("cell {0} is outside the board")]
    OutOfBounds(Vector),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
