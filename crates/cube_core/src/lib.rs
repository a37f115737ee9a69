//! 3×3×3 twisty puzzle backend: cubie model, move table, notation, and
//! scrambler.
//!
//! This crate knows nothing about animation or rendering. The logical state
//! only ever changes one whole quarter turn at a time, via
//! [`CubieStore::commit_rotation()`].

#[cfg(test)]
use criterion as _; // Suppress unused crate warning (it's used in a benchmark)

mod colors;
mod cubie;
mod moves;
pub mod notation;
mod scramble;
mod store;


/// Re-export of `cubemath`.
pub use cubemath;
pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use cubemath::{Axis, LatticePoint, Quat, Sign, Vector3};

    pub use crate::colors::{Face, FaceColor, FaceColors, Rgb};
    pub use crate::cubie::{Cubie, CubieId, CubieSet};
    pub use crate::moves::{MOVES, Move};
    pub use crate::notation::NotationError;
    pub use crate::scramble::{ScrambleParams, random_moves};
    pub use crate::store::CubieStore;
}

/// Number of cubies in the puzzle, including the hidden core.
pub const CUBIE_COUNT: usize = 27;

/// Number of cubies in one slice.
pub const SLICE_SIZE: usize = 9;

/// Default number of moves in a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: u32 = 20;

/// Version string such as `cube_core v1.2.3`.
pub const PUZZLE_ENGINE_VERSION_STRING: &str =
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
