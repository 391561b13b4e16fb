//! Simulation time model.
//!
//! Time is a monotonically increasing `Round` counter.  One round advances
//! every forklift once, then every truck once, then rebuilds the board; there
//! is no finer-grained clock.

use std::fmt;

// ── Round ─────────────────────────────────────────────────────────────────────

/// An absolute simulation round counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u64);

impl Round {
    pub const ZERO: Round = Round(0);

    /// The round after `self`.
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }

    /// `true` if `self` falls on an `interval` boundary.  An interval of zero
    /// never matches.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Round {
    type Output = Round;
    #[inline]
    fn add(self, rhs: u64) -> Round {
        Round(self.0 + rhs)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// `max_rounds` normally comes from the world snapshot's round budget; the
/// application crate may override it from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Round budget.  The simulation ends `Unfinished` once this many rounds
    /// have run with parcels left on the floor.
    pub max_rounds: u64,

    /// Emit an observer snapshot every N rounds.  1 = every round; 0 = never.
    pub output_interval_rounds: u64,
}

impl SimConfig {
    /// Configuration with the given budget and a snapshot every round.
    pub fn with_budget(max_rounds: u64) -> Self {
        Self { max_rounds, output_interval_rounds: 1 }
    }

    /// The round at which the budget is exhausted.
    #[inline]
    pub fn end_round(&self) -> Round {
        Round(self.max_rounds)
    }
}
