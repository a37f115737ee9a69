use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::{MOVES, Move};

/// Parameters to deterministically generate a move sequence to scramble the
/// puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of moves to generate.
    pub len: u32,
    /// Random seed. The same seed always produces the same scramble.
    pub seed: String,
}

impl ScrambleParams {
    /// Returns parameters for a scramble with a fresh random seed.
    pub fn new(len: u32) -> Self {
        let seed = format!("{:016x}", rand::rng().random::<u64>());
        Self { len, seed }
    }
    /// Returns parameters for a scramble with a specific seed.
    pub fn with_seed(len: u32, seed: impl Into<String>) -> Self {
        Self {
            len,
            seed: seed.into(),
        }
    }

    /// Generates the scramble.
    pub fn generate(&self) -> Vec<Move> {
        let seed: [u8; 32] = sha2::Sha256::digest(self.seed.as_bytes()).into();
        let mut rng = rand_chacha::ChaCha12Rng::from_seed(seed);
        let moves = random_moves(&mut rng, self.len as usize);
        log::info!(
            "generated scramble of length {} from seed {:?}",
            self.len,
            self.seed,
        );
        moves
    }
}

/// Draws `len` moves uniformly from the move table, redrawing any move that
/// turns around the same axis as the move before it.
///
/// This keeps consecutive moves from trivially cancelling or merging, but it
/// is only a heuristic: the result is not uniformly distributed over reduced
/// move sequences.
pub fn random_moves(rng: &mut impl Rng, len: usize) -> Vec<Move> {
    let mut ret: Vec<Move> = Vec::with_capacity(len);
    while ret.len() < len {
        let candidate = MOVES[rng.random_range(0..MOVES.len())];
        if ret.last().is_some_and(|prev| prev.axis == candidate.axis) {
            continue;
        }
        ret.push(candidate);
    }
    ret
}
