//! `wh-spatial` — occupancy grid and pathfinding.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`board`]       | `Board`, `Cell`                                         |
//! | [`pathfinding`] | `PathFinder` trait, `Heuristic` trait, `AStar`, `Path`  |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod board;
pub mod error;
pub mod pathfinding;


pub use board::{Board, Cell};
pub use error::{SpatialError, SpatialResult};
pub use pathfinding::{
    AStar, Heuristic, Path, PathFinder, SquaredDistance, find_path_to_occupied, resolve,
    resolve_with,
};
