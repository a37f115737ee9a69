use std::fmt;
use std::ops::Index;

use crate::{Axis, Float, Quat, Sign, Vector3};

/// Point on the integer lattice {-1, 0, 1}³ occupied by the cubies of a
/// 3×3×3 puzzle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticePoint(pub [i8; 3]);

impl LatticePoint {
    /// Center of the puzzle.
    pub const ORIGIN: Self = Self([0, 0, 0]);

    /// Constructs a lattice point from its coordinates.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self([x, y, z])
    }

    /// Returns an iterator over all 27 lattice points, with X varying slowest
    /// and Z varying fastest.
    pub fn all() -> impl Iterator<Item = Self> {
        (-1..=1).flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| Self::new(x, y, z))))
    }

    /// Returns the coordinate along `axis`.
    pub fn get(self, axis: Axis) -> i8 {
        self.0[axis.index()]
    }

    /// Returns whether every coordinate is in {-1, 0, 1}.
    pub fn is_in_bounds(self) -> bool {
        self.0.iter().all(|c| (-1..=1).contains(c))
    }

    /// Returns the point as a floating-point vector.
    pub fn to_vector(self) -> Vector3 {
        let [x, y, z] = self.0.map(Float::from);
        Vector3::new(x, y, z)
    }

    /// Rounds each component of `v` to the nearest integer, clamped to the
    /// lattice.
    pub fn from_rounded(v: Vector3) -> Self {
        Self(v.to_array().map(|c| c.round().clamp(-1.0, 1.0) as i8))
    }

    /// Returns the point rotated a quarter turn around `axis` in the
    /// direction `sign` (right-hand rule).
    ///
    /// The result is re-rounded to the lattice so that floating-point error in
    /// the rotation never leaks into the logical position.
    #[must_use]
    pub fn rotated(self, axis: Axis, sign: Sign) -> Self {
        Self::from_rounded(Quat::quarter_turn(axis, sign).rotate(self.to_vector()))
    }

    /// Returns the number of nonzero coordinates: 0 for the core, 1 for a face
    /// center, 2 for an edge, and 3 for a corner.
    pub fn nonzero_count(self) -> usize {
        self.0.iter().filter(|&&c| c != 0).count()
    }
}

impl Index<Axis> for LatticePoint {
    type Output = i8;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.index()]
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "({x}, {y}, {z})")
    }
}
