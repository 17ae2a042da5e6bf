//! World Kernel: the tile map, the player pose and the fixed-step update.
//!
//! # Invariants
//! - The map is immutable after construction.
//! - The player pose changes only through `World::update`, once per fixed tick.

pub mod map;
pub mod world;

pub use map::{CellKind, Map, MapError};
pub use world::{MovementPolicy, World};

pub fn crate_info() -> &'static str {
    "wolfcast-kernel v0.1.0"
}
