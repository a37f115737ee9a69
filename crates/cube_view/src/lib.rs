//! Animation, camera, and pointer interaction for the cube turn engine.
//!
//! [`PuzzleSimulation`] drives a queue of moves through a fixed-rate tick,
//! committing each one to the logical state only once its animation ends.
//! [`PuzzleView`] translates pointer input into camera orbits and queued
//! moves.

pub mod animations;
mod camera;
pub mod drag;
mod simulation;
mod view;

#[cfg(test)]
mod tests;

pub use camera::Camera;
pub use drag::{DragGesture, resolve_screen_drag, resolve_world_drag};
pub use simulation::{CubieTransform, MoveCompleteCallback, PuzzleSimulation, TickResult};
pub use view::{DragState, PuzzleView};

/// Re-export of `cube_core`.
pub use cube_core;
/// Re-export of `cube_prefs`.
pub use cube_prefs;
