//! Randomness behind a trait, so matches can be replayed in tests.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision in the arena.
///
/// The arena draws, in this order, when a match starts: the seeker's
/// health, the seeker's power moves, the partner's health, the partner's
/// power moves. A power move flips first and rolls damage only on a hit.
pub trait Dice: Send + 'static {
    /// Returns a value in `range` (inclusive). The range is never empty.
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32;

    /// A fair coin. `true` means a power move lands.
    fn flip(&mut self) -> bool;
}

/// [`Dice`] backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible dice: the same seed yields the same matches.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.random_range(range)
    }

    fn flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
