//! Lattice, vector, and quaternion primitives for a 3×3×3 twisty puzzle.
//!
//! Everything here is a plain `Copy` value type so that the logical puzzle
//! model never depends on a rendering library's math classes.

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons.
pub const EPSILON: Float = 0.000001;

/// Names for the three principal axes.
pub const AXIS_NAMES: &str = "XYZ";

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {{
        let (a, b): ($crate::Float, $crate::Float) = ($a, $b);
        assert!(
            $crate::approx_cmp::approx_eq(a, b),
            "assertion failed: `{a} ≈ {b}` (epsilon = {})",
            $crate::EPSILON,
        );
    }};
}

pub mod approx_cmp;
mod axis;
mod lattice;
mod quat;
mod sign;
mod vector;


/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::approx_cmp::*;
    pub use crate::axis::Axis;
    pub use crate::lattice::LatticePoint;
    pub use crate::quat::Quat;
    pub use crate::sign::Sign;
    pub use crate::vector::Vector3;
    pub use crate::{AXIS_NAMES, EPSILON, Float};
}
pub use prelude::*;
