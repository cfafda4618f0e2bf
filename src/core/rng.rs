//! Deterministic random number generation.
//!
//! Every source of randomness in the engine (deck shuffling, randomized deal
//! order, synthetic action generation) flows through `GameRng`, so a game is
//! fully reproducible from its seed.
//!
//! ## Forking
//!
//! Each thread gets its own stream: the dealer forks one `GameRng` per
//! synthetic player before spawning it, so concurrent draws never contend
//! and the per-thread sequences stay deterministic regardless of thread
//! scheduling.
//!
//! ```
//! use matchboard::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut worker_rng = rng.fork();
//!
//! // Original and fork produce independent sequences
//! assert_ne!(rng.gen_range_usize(0..1000), worker_rng.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic, forkable RNG.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness. Forks are
/// deterministic: the n-th fork of a seed always yields the same stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG into an independent deterministic stream.
    ///
    /// Used to hand each spawned thread its own generator.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
