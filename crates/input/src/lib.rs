//! Input: logical actions and the held-key state read by the simulation.
//!
//! # Invariants
//! - The simulation reads actions, never platform key codes.
//! - `previous` changes only through `snapshot`, once per fixed tick.

pub mod action;
pub mod state;

pub use action::Action;
pub use state::{InputState, SharedInput};

pub fn crate_info() -> &'static str {
    "wolfcast-input v0.1.0"
}
