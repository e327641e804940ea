//! Deterministic random number generation for matches and AI simulation.
//!
//! Every random decision the rules make (deck shuffles, miss chances,
//! random freeze or draw targets) goes through the `GameRng` stored in the
//! match state. Two matches built from the same seed and fed the same
//! intents end in the same state.
//!
//! ## Simulation
//!
//! ```
//! use hearthfire::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for an AI simulation branch
//! let mut sim_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(rng.below(1_000_000), sim_rng.below(1_000_000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Golden-ratio step between consecutive fork seeds.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// The match's source of randomness.
///
/// Lives inside `GameState`, so cloning a state clones its stream too and
/// a replay from the same seed draws the same numbers in the same order.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// A fresh stream for a simulated branch.
    ///
    /// The n-th fork of a given seed is always the same stream, and forking
    /// does not consume numbers from `self`, so the live match is unaffected
    /// by how many branches the AI explores.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    /// Uniform integer in `0..bound`. Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.inner.gen_range(0..bound)
        }
    }

    /// Random slot in a board or hand of `len` entries.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// True with `percent` chance, clamped to 100. Used for miss rolls.
    pub fn chance(&mut self, percent: u8) -> bool {
        let p = f64::from(percent.min(100)) / 100.0;
        self.inner.gen_bool(p)
    }

    /// Deck shuffles.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Position in the stream, for a match snapshot.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.forks,
        }
    }

    /// Resume a stream captured by `state`. The next number drawn is the one
    /// the captured stream would have drawn.
    #[must_use]
    pub fn from_state(saved: &GameRngState) -> Self {
        let mut rng = Self::new(saved.seed);
        rng.inner.set_word_pos(saved.word_pos);
        rng.forks = saved.fork_counter;
        rng
    }
}

/// Where a match's RNG stands, as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    /// Forks handed out so far.
    pub fork_counter: u64,
}
