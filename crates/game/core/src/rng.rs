//! Seedable random source for board generation.
//!
//! Board generation accepts any [`rand::Rng`]. [`PcgRng`] is the deterministic
//! one: the same seed always deals the same board, which makes a level
//! attempt replayable from `(game_seed, level, attempt)`.
//!
//! None of this is suitable for security-sensitive selection. It only has to
//! be uniform enough for a card shuffle.

use rand_core::{RngCore, SeedableRng, impls};

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64-bit LCG state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // Step once so that nearby seeds do not start on nearby states.
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.step();
        rng
    }

    /// Advance the LCG: `state' = state * multiplier + increment (mod 2^64)`.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngCore for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PcgRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Derives the seed for one attempt at one level.
///
/// Mixing constants are the SplitMix64 / FxHash multipliers followed by the
/// MurmurHash3 finalizer, so consecutive attempts land far apart.
pub fn level_seed(game_seed: u64, level: u32, attempt: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= (level as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (attempt as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}

/// Returns a generator for `(game_seed, level, attempt)`.
pub fn level_rng(game_seed: u64, level: u32, attempt: u32) -> PcgRng {
    PcgRng::new(level_seed(game_seed, level, attempt))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        let a_values: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_values: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_values, b_values);
    }

    #[test]
    fn level_seed_separates_attempts_and_levels() {
        let base = level_seed(7, 10, 0);
        assert_ne!(base, level_seed(7, 10, 1));
        assert_ne!(base, level_seed(7, 11, 0));
        assert_ne!(base, level_seed(8, 10, 0));
        assert_eq!(base, level_seed(7, 10, 0));
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut rng = level_rng(99, 3, 0);
        for i in 1..64usize {
            let j = rng.gen_range(0..=i);
            assert!(j <= i);
        }
    }
}
