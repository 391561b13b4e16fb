//! `wh-core` — foundational types for the warehouse simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It intentionally
//! has no `wh-*` dependencies and no external ones beyond optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ParcelId`, `ForkliftId`, `TruckId`                   |
//! | [`vector`]      | `Vector` grid coordinate / displacement               |
//! | [`time`]        | `Round`, `SimConfig`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod time;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{ForkliftId, ParcelId, TruckId};
pub use time::{Round, SimConfig};
pub use vector::Vector;
