//! Engine: the fixed-timestep loop tying input, simulation, rendering and
//! presentation together.
//!
//! # Invariants
//! - Simulation advances only in whole fixed steps; leftover time carries over.
//! - After each iteration's update phase, `unprocessed < frame_cap`.
//! - A frame is rendered and presented only if at least one update ran.
//! - Stopping is requested through a `StopSignal`; the loop owns its state.

mod clock;
mod game_loop;
mod presenter;

pub use clock::{Clock, FixedStepClock, SystemClock};
pub use game_loop::{GameLoop, Iteration, LoopState, LoopStats, StopSignal};
pub use presenter::{HeadlessPresenter, PresentError, Presenter};

pub fn crate_info() -> &'static str {
    "wolfcast-engine v0.1.0"
}
