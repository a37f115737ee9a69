use std::fmt;

use cubemath::{Axis, Sign};
use serde::Serialize;

use crate::Face;

/// Quarter turn of one slice of the puzzle.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Axis around which the slice turns.
    pub axis: Axis,
    /// Coordinate along `axis` of the slice that turns.
    pub slice: i8,
    /// Sense of the rotation around the positive end of `axis`, using the
    /// right-hand rule: [`Sign::Pos`] is counterclockwise when viewed from
    /// the positive end.
    pub direction: Sign,
    /// Display name, such as `U1`.
    pub name: Option<&'static str>,
}

macro_rules! face_moves {
    ($face:ident, $axis:ident, $slice:expr, $cw:ident, $ccw:ident) => {
        [
            Move {
                axis: Axis::$axis,
                slice: $slice,
                direction: Sign::$cw,
                name: Some(concat!(stringify!($face), "1")),
            },
            Move {
                axis: Axis::$axis,
                slice: $slice,
                direction: Sign::$ccw,
                name: Some(concat!(stringify!($face), "2")),
            },
        ]
    };
}

const fn flatten_pairs(pairs: [[Move; 2]; 6]) -> [Move; 12] {
    let [[u1, u2], [d1, d2], [l1, l2], [r1, r2], [f1, f2], [b1, b2]] = pairs;
    [u1, u2, d1, d2, l1, l2, r1, r2, f1, f2, b1, b2]
}

/// All twelve canonical moves.
///
/// The key `X1` turns face `X` clockwise as seen when looking at that face, and
/// `X2` turns it counterclockwise. Clockwise on a face at the positive end of
/// its axis is a negative rotation around that axis.
pub const MOVES: [Move; 12] = flatten_pairs([
    face_moves!(U, Y, 1, Neg, Pos),
    face_moves!(D, Y, -1, Pos, Neg),
    face_moves!(L, X, -1, Pos, Neg),
    face_moves!(R, X, 1, Neg, Pos),
    face_moves!(F, Z, 1, Neg, Pos),
    face_moves!(B, Z, -1, Pos, Neg),
]);

impl Move {
    /// Returns the canonical move that turns slice `slice` around `axis` in
    /// the direction `direction`, or `None` if there is none.
    pub fn lookup(axis: Axis, slice: i8, direction: Sign) -> Option<Move> {
        MOVES
            .iter()
            .find(|m| m.axis == axis && m.slice == slice && m.direction == direction)
            .copied()
    }

    /// Returns the canonical move with the given key, such as `R1`.
    pub fn from_name(name: &str) -> Option<Move> {
        MOVES.iter().find(|m| m.name == Some(name)).copied()
    }

    /// Returns an iterator over all canonical moves.
    pub fn all() -> impl Iterator<Item = Move> {
        MOVES.into_iter()
    }

    /// Returns the face adjacent to the slice, if it is an outer slice.
    pub fn face(self) -> Option<Face> {
        Some(Face::from_axis_sign(self.axis, Sign::from_int(self.slice)?))
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn rev(self) -> Move {
        Self::lookup(self.axis, self.slice, -self.direction).unwrap_or(Move {
            direction: -self.direction,
            name: None,
            ..self
        })
    }

    /// Returns whether the move turns the same slice as `other`, in either
    /// direction.
    pub fn same_slice_as(self, other: Move) -> bool {
        self.axis == other.axis && self.slice == other.slice
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}[{}]{}", self.axis, self.slice, self.direction),
        }
    }
}
