//! `wh-actor` — the three actor kinds and their per-round state machines.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`parcel`]    | `Parcel`, `ParcelStatus`, `WeightClass`                  |
//! | [`forklift`]  | `Forklift`, `ForkliftStatus`                             |
//! | [`truck`]     | `Truck`, `TruckStatus`                                   |
//! | [`target`]    | `Target`, a forklift's parcel-or-truck goal              |
//! | [`nearest`]   | `find_closest_parcel`, `find_closest_truck`              |
//! | [`context`]   | `RoundContext`, shared state lent to one actor step      |
//! | [`action`]    | `ForkliftAction`, `TruckReport`                          |
//! | [`error`]     | `ActionError`, `ActionResult`                            |
//!
//! # Ownership
//!
//! Actors never hold references to each other.  A forklift's target and
//! carried parcel are [`wh_core::ParcelId`] / [`wh_core::TruckId`] indices
//! into the collections owned by the orchestrator, resolved through the
//! [`RoundContext`] it is lent for the duration of one step.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod action;
pub mod context;
pub mod error;
pub mod forklift;
pub mod nearest;
pub mod parcel;
pub mod target;
pub mod truck;


pub use action::{ForkliftAction, TruckReport};
pub use context::RoundContext;
pub use error::{ActionError, ActionResult};
pub use forklift::{Forklift, ForkliftStatus};
pub use nearest::{find_closest_parcel, find_closest_truck};
pub use parcel::{Parcel, ParcelStatus, UnknownWeightClass, WeightClass};
pub use target::Target;
pub use truck::{Truck, TruckStatus};
