use cubemath::{Axis, LatticePoint, Quat, Sign};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{CUBIE_COUNT, Cubie, CubieId, CubieSet, Face, Move};

/// Logical state of the puzzle: the position and orientation of all 27
/// cubies.
///
/// The store is a plain value. Every change produces a new store instead of
/// mutating the old one, so a reader holding a copy (typically behind an
/// `Arc`) never observes a partially applied move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CubieStore {
    cubies: [Cubie; CUBIE_COUNT],
}

impl Default for CubieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CubieStore {
    /// Constructs a solved puzzle with one cubie at every point of
    /// {-1, 0, 1}³. IDs are assigned with X varying slowest and Z varying
    /// fastest.
    pub fn new() -> Self {
        let mut homes = LatticePoint::all();
        let cubies = std::array::from_fn(|i| {
            let home = homes.next().unwrap_or_default();
            Cubie::new(CubieId(i as u8), home)
        });
        Self { cubies }
    }

    /// Returns the cubie with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of range.
    pub fn get(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.index()]
    }
    /// Returns the cubie with the given ID, or `None` if the ID is out of
    /// range.
    pub fn try_get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.index())
    }
    /// Returns an iterator over all cubies, in order of ID.
    pub fn iter(&self) -> impl Iterator<Item = &Cubie> {
        self.cubies.iter()
    }
    /// Returns the cubie currently at `position`.
    pub fn cubie_at(&self, position: LatticePoint) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.position == position)
    }

    /// Returns the cubies whose current coordinate along `axis` is `slice`.
    pub fn cubies_in_slice(&self, axis: Axis, slice: i8) -> CubieSet {
        self.cubies
            .iter()
            .filter(|c| c.position.get(axis) == slice)
            .map(|c| c.id)
            .collect()
    }

    /// Returns the cubies affected by `mv`.
    pub fn grip(&self, mv: Move) -> CubieSet {
        self.cubies_in_slice(mv.axis, mv.slice)
    }

    /// Returns a new store in which every cubie in `ids` has been turned a
    /// quarter turn around `axis` in the direction `direction`.
    ///
    /// Positions are rotated and re-rounded to the lattice. Orientations are
    /// left-multiplied by the exact quarter-turn quaternion and then snapped
    /// back onto the 24 cube symmetries so that error cannot accumulate over
    /// many moves.
    #[must_use]
    pub fn commit_rotation(&self, ids: CubieSet, axis: Axis, direction: Sign) -> Self {
        let turn = Quat::quarter_turn(axis, direction);
        let mut ret = self.clone();
        for id in ids.iter() {
            let Some(cubie) = ret.cubies.get_mut(id.index()) else {
                continue;
            };
            cubie.position = cubie.position.rotated(axis, direction);
            cubie.rotation = (turn * cubie.rotation).snap_to_cube_symmetry();
        }
        debug_assert!(ret.is_lattice_bijection(), "move broke the puzzle: {ret:?}");
        ret
    }

    /// Returns a new store with `mv` applied.
    #[must_use]
    pub fn do_move(&self, mv: Move) -> Self {
        self.commit_rotation(self.grip(mv), mv.axis, mv.direction)
    }
    /// Returns a new store with every move in `moves` applied in order.
    #[must_use]
    pub fn do_moves(&self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves
            .into_iter()
            .fold(self.clone(), |state, mv| state.do_move(mv))
    }

    /// Returns whether the 27 cubie positions are exactly the 27 points of
    /// {-1, 0, 1}³, each occupied once.
    pub fn is_lattice_bijection(&self) -> bool {
        let mut seen = [false; CUBIE_COUNT];
        for cubie in &self.cubies {
            if !cubie.position.is_in_bounds() {
                return false;
            }
            let [x, y, z] = cubie.position.0.map(|c| (c + 1) as usize);
            let i = x * 9 + y * 3 + z;
            if std::mem::replace(&mut seen[i], true) {
                return false;
            }
        }
        true
    }

    /// Returns the color of every sticker currently visible on `face`.
    pub fn stickers_on(&self, face: Face) -> impl Iterator<Item = crate::FaceColor> + '_ {
        self.cubies
            .iter()
            .filter(move |c| c.position.get(face.axis()) == face.slice())
            .filter_map(move |c| c.sticker_facing(face))
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        Face::iter().all(|face| {
            let mut stickers = self.stickers_on(face);
            match stickers.next() {
                Some(first) => stickers.all(|c| c == first),
                None => true,
            }
        })
    }
}
