//! `wh-input` — reads a world file into a [`wh_sim::WorldSnapshot`].
//!
//! # Crate layout
//!
//! | Module     | Contents                                        |
//! |------------|-------------------------------------------------|
//! | [`loader`] | `load_world`, `load_world_reader`, `parse_world` |
//! | [`error`]  | `InputError`, `InputResult<T>`, `Section`       |
//!
//! The loader only checks syntax and section order.  Semantic checks
//! (bounds, stacking, duplicate names, truck placement) belong to
//! [`wh_sim::validate`] and run when the simulation is built.

pub mod error;
pub mod loader;


pub use error::{InputError, InputResult, Section};
pub use loader::{load_world, load_world_reader, parse_world, MAX_ROUNDS, MIN_ROUNDS};
