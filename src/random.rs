//! Seeded integer generators
//!
//! Every stage that needs randomness receives its own [`RandInt`] built from
//! an explicit seed, so the whole pipeline is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator of integers in `[0, n)`.
#[derive(Clone, Debug)]
pub struct RandInt {
    rng: ChaCha8Rng,
}

impl RandInt {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Integer in `[0, n)`. `n` must be positive.
    pub fn next(&mut self, n: usize) -> usize {
        assert!(n > 0, "RandInt::next called with an empty range");
        self.rng.gen_range(0..n)
    }
}

/// Fisher-Yates shuffle driven by `rand_int`.
pub fn random_shuffle<T>(items: &mut [T], rand_int: &mut RandInt) {
    for i in (1..items.len()).rev() {
        let j = rand_int.next(i + 1);
        items.swap(i, j);
    }
}
