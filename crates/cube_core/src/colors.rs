use std::fmt;
use std::ops::Index;

use cubemath::{Axis, LatticePoint, Sign, Vector3};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Face of the cube, named from the viewer's perspective in the home
/// orientation.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
pub enum Face {
    /// +X
    R,
    /// -X
    L,
    /// +Y
    U,
    /// -Y
    D,
    /// +Z
    F,
    /// -Z
    B,
}

impl Face {
    /// All six faces, in declaration order.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns which end of the axis the face is on.
    pub fn sign(self) -> Sign {
        match self {
            Face::R | Face::U | Face::F => Sign::Pos,
            Face::L | Face::D | Face::B => Sign::Neg,
        }
    }
    /// Returns the face on the given end of the given axis.
    pub fn from_axis_sign(axis: Axis, sign: Sign) -> Self {
        match (axis, sign) {
            (Axis::X, Sign::Pos) => Face::R,
            (Axis::X, Sign::Neg) => Face::L,
            (Axis::Y, Sign::Pos) => Face::U,
            (Axis::Y, Sign::Neg) => Face::D,
            (Axis::Z, Sign::Pos) => Face::F,
            (Axis::Z, Sign::Neg) => Face::B,
        }
    }
    /// Returns the face whose outward normal is closest to `v`, or `None` if
    /// `v` is zero.
    pub fn nearest_to(v: Vector3) -> Option<Self> {
        let axis = v.dominant_axis()?;
        Some(Self::from_axis_sign(axis, Sign::from_float(v[axis])?))
    }
    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vector3 {
        self.axis().unit() * self.sign().to_float()
    }
    /// Returns the lattice coordinate of the layer adjacent to this face.
    pub fn slice(self) -> i8 {
        self.sign().to_int()
    }
    /// Returns the color of the face when the puzzle is solved.
    pub fn home_color(self) -> FaceColor {
        match self {
            Face::R => FaceColor::Red,
            Face::L => FaceColor::Orange,
            Face::U => FaceColor::White,
            Face::D => FaceColor::Yellow,
            Face::F => FaceColor::Green,
            Face::B => FaceColor::Blue,
        }
    }
}

/// Sticker color.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FaceColor {
    /// Home color of [`Face::R`].
    Red,
    /// Home color of [`Face::L`].
    Orange,
    /// Home color of [`Face::U`].
    White,
    /// Home color of [`Face::D`].
    Yellow,
    /// Home color of [`Face::F`].
    Green,
    /// Home color of [`Face::B`].
    Blue,
}

impl FaceColor {
    /// Returns the default display color.
    pub fn rgb(self) -> Rgb {
        match self {
            FaceColor::Red => Rgb([0xb7, 0x12, 0x34]),
            FaceColor::Orange => Rgb([0xff, 0x58, 0x00]),
            FaceColor::White => Rgb([0xff, 0xff, 0xff]),
            FaceColor::Yellow => Rgb([0xff, 0xd5, 0x00]),
            FaceColor::Green => Rgb([0x00, 0x9b, 0x48]),
            FaceColor::Blue => Rgb([0x00, 0x46, 0xad]),
        }
    }
}

/// sRGB color.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Sticker colors on each face of a cubie, in the cubie's own frame.
///
/// Faces that are hidden inside the puzzle have no sticker.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceColors([Option<FaceColor>; 6]);

impl FaceColors {
    /// Returns the stickers for a cubie whose home is `home`: one sticker per
    /// outward-facing side.
    pub fn for_home_position(home: LatticePoint) -> Self {
        let mut ret = Self::default();
        for face in Face::iter() {
            if home.get(face.axis()) == face.slice() {
                ret.0[face as usize] = Some(face.home_color());
            }
        }
        ret
    }

    /// Returns an iterator over the faces that have stickers and their colors.
    pub fn iter(&self) -> impl Iterator<Item = (Face, FaceColor)> + '_ {
        Face::iter().filter_map(|face| Some((face, self[face]?)))
    }

    /// Returns the number of stickers.
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }
    /// Returns whether there are no stickers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<Face> for FaceColors {
    type Output = Option<FaceColor>;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face as usize]
    }
}
