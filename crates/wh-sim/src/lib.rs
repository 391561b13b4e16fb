//! `wh-sim` — round loop orchestrator for the warehouse simulator.
//!
//! # Round structure
//!
//! ```text
//! simulate_round():
//!   ① Termination: every parcel delivered → Finished, return.
//!   ② Forklifts:   each forklift plays once, in registration order.
//!                   Board occupancy follows each move immediately.
//!   ③ Trucks:      each truck plays once, in registration order.
//!   ④ Rebuild:     board cleared, then undelivered parcels, forklifts and
//!                   loading trucks marked blocked.
//!   ⑤ Round++:     Finished if everything is delivered, otherwise
//!                   Unfinished once the round budget is spent.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_sim::{NoopObserver, SimBuilder};
//! use wh_spatial::AStar;
//!
//! let mut sim = SimBuilder::new(snapshot, AStar::new()).build()?;
//! let status = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod snapshot;
pub mod validate;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{EntityKind, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{RoundReport, WorldView};
pub use sim::{SimStatus, Simulation};
pub use snapshot::{ForkliftSpec, ParcelSpec, TruckSpec, WorldSnapshot};
pub use validate::validate;
