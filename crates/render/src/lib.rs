//! Rendering: per-column raycasting into a software framebuffer.
//!
//! # Invariants
//! - Renderers read the world; they never mutate it.
//! - Every frame starts from a full clear, so no pixel survives between frames.
//!
//! The `Renderer` trait keeps consumers independent of the output: the game
//! loop drives a `SlabRenderer` into a `Framebuffer`, the CLI drives a
//! `DebugTextRenderer` into a `String`.

mod caster;
mod framebuffer;
mod renderer;

pub use caster::{RayCaster, RayHit};
pub use framebuffer::Framebuffer;
pub use renderer::{DebugTextRenderer, RenderStats, Renderer, SlabRenderer, half_height};

pub fn crate_info() -> &'static str {
    "wolfcast-render v0.1.0"
}
