use std::fmt;
use std::ops::{Mul, Neg};

use crate::Float;

/// Positive or negative.
///
/// Used both for the side of the cube a face is on and for the sense of a
/// rotation around an axis (right-hand rule).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}

impl Sign {
    /// Both signs, negative first.
    pub const ALL: [Sign; 2] = [Sign::Neg, Sign::Pos];

    /// Returns `+1` or `-1`.
    pub fn to_int(self) -> i8 {
        self as i8
    }
    /// Returns `+1.0` or `-1.0`.
    pub fn to_float(self) -> Float {
        self.to_int() as Float
    }
    /// Returns the sign of an integer, or `None` if it is zero.
    pub fn from_int(i: impl Into<i64>) -> Option<Self> {
        match i.into() {
            0 => None,
            i if i < 0 => Some(Sign::Neg),
            _ => Some(Sign::Pos),
        }
    }
    /// Returns the sign of a float, or `None` if it is approximately zero.
    pub fn from_float(x: Float) -> Option<Self> {
        if crate::is_approx_positive(x) {
            Some(Sign::Pos)
        } else if crate::is_approx_negative(x) {
            Some(Sign::Neg)
        } else {
            None
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Self) -> Self::Output {
        if self == rhs { Sign::Pos } else { Sign::Neg }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Neg => write!(f, "-"),
            Sign::Pos => write!(f, "+"),
        }
    }
}
