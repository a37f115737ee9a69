use std::fmt;

use cubemath::{LatticePoint, Quat, Vector3};
use serde::{Deserialize, Serialize};

use crate::{CUBIE_COUNT, Face, FaceColor, FaceColors};

/// ID of a cubie, in the range `0..27`.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct CubieId(pub u8);

impl CubieId {
    /// Returns the ID as an index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Returns an iterator over all cubie IDs.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..CUBIE_COUNT as u8).map(Self)
    }
    /// Returns the ID with the given index, or `None` if it is out of range.
    pub fn try_from_index(i: usize) -> Option<Self> {
        (i < CUBIE_COUNT).then_some(Self(i as u8))
    }
}

impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the 27 small cubes making up the puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Cubie {
    /// Stable ID.
    pub id: CubieId,
    /// Position in the solved state, from which the colors were derived.
    pub home: LatticePoint,
    /// Current position.
    pub position: LatticePoint,
    /// Current orientation, relative to the home orientation.
    pub rotation: Quat,
    /// Sticker colors, in the cubie's own frame.
    pub colors: FaceColors,
}

impl Cubie {
    /// Constructs a solved cubie at `home`.
    pub fn new(id: CubieId, home: LatticePoint) -> Self {
        Self {
            id,
            home,
            position: home,
            rotation: Quat::IDENT,
            colors: FaceColors::for_home_position(home),
        }
    }

    /// Returns the world-space outward normal of the sticker that started on
    /// `local_face`.
    pub fn world_normal(&self, local_face: Face) -> Vector3 {
        self.rotation.rotate(local_face.normal())
    }

    /// Returns the color of the sticker currently facing `world_face`, if
    /// there is one.
    pub fn sticker_facing(&self, world_face: Face) -> Option<FaceColor> {
        self.colors
            .iter()
            .find(|&(local_face, _)| Face::nearest_to(self.world_normal(local_face)) == Some(world_face))
            .map(|(_, color)| color)
    }

    /// Returns whether the cubie is at its home position with its home
    /// orientation.
    pub fn is_home(&self) -> bool {
        self.position == self.home && self.rotation.is_same_rotation(Quat::IDENT)
    }
}

/// Set of cubies, stored as a bitmask.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CubieSet(u32);

impl CubieSet {
    /// Empty set.
    pub const EMPTY: Self = Self(0);

    /// Adds a cubie to the set.
    pub fn insert(&mut self, id: CubieId) {
        self.0 |= bit(id);
    }
    /// Returns whether the set contains a cubie.
    pub fn contains(self, id: CubieId) -> bool {
        self.0 & bit(id) != 0
    }
    /// Returns the number of cubies in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
    /// Returns whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    /// Returns an iterator over the cubies in the set, in order of ID.
    pub fn iter(self) -> impl Iterator<Item = CubieId> {
        CubieId::iter().filter(move |&id| self.contains(id))
    }
}

fn bit(id: CubieId) -> u32 {
    1_u32.checked_shl(id.0 as u32).unwrap_or(0)
}

impl FromIterator<CubieId> for CubieSet {
    fn from_iter<T: IntoIterator<Item = CubieId>>(iter: T) -> Self {
        let mut ret = Self::EMPTY;
        for id in iter {
            ret.insert(id);
        }
        ret
    }
}
