use strum::{Display, EnumIter, EnumString};

use crate::{AXIS_NAMES, Vector3};

/// Principal axis in 3D space.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Axis {
    /// X axis, pointing right.
    X = 0,
    /// Y axis, pointing up.
    Y = 1,
    /// Z axis, pointing toward the viewer.
    Z = 2,
}

impl Axis {
    /// All three axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the index of the axis: 0, 1, or 2.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the axis with the given index.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
    /// Returns the axis named by a character such as `'x'` or `'Y'`.
    pub fn from_char(c: char) -> Option<Self> {
        AXIS_NAMES
            .find(c.to_ascii_uppercase())
            .and_then(Self::from_index)
    }

    /// Returns the unit vector along the positive end of the axis.
    pub fn unit(self) -> Vector3 {
        let mut ret = Vector3::ZERO;
        ret[self] = 1.0;
        ret
    }

    /// Returns the other two axes, in cyclic order so that
    /// `a.others() == [b, c]` implies `a × b = c`.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}
