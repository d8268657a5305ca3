//! Injectable random sources.
//!
//! Every roll in combat (critical hits, special-ability picks, passive
//! ability chances, reward drops) goes through one [`RandomSource`] owned by
//! the session. Swapping the source is how tests and replays get exact,
//! reproducible sequences.
//!
//! # Determinism
//!
//! [`PcgRandom`] and [`StdRandom::seeded`] produce the same sequence for the
//! same seed. [`SequenceRandom`] replays a fixed list of values.

use rand::{RngCore, SeedableRng, rngs::StdRng};

/// A stream of random numbers consumed by the combat rules.
pub trait RandomSource: Send {
    /// Produces the next raw value.
    fn next_u32(&mut self) -> u32;

    /// Rolls a percentile in `0..100`.
    fn roll_percent(&mut self) -> u32 {
        self.next_u32() % 100
    }

    /// Returns true with the given probability (0-100).
    ///
    /// Always consumes exactly one value, so replayed sequences stay aligned
    /// no matter which odds are configured.
    fn chance(&mut self, percent: u32) -> bool {
        self.roll_percent() < percent
    }

    /// Picks an index in `0..len` uniformly. Returns 0 for an empty range.
    fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32() as usize % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output. Small, fast and
/// fully deterministic, which makes it the default source for sessions.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRandom {
    state: u64,
}

impl PcgRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Advance the PCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRandom {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl RandomSource for PcgRandom {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

/// SplitMix-style avalanche so nearby seeds start far apart.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed ^ 0x9e3779b97f4a7c15;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Adapter over `rand`'s standard generator.
#[derive(Clone, Debug)]
pub struct StdRandom {
    inner: StdRng,
}

impl StdRandom {
    /// Seeds from operating-system entropy, for live play.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// `next_u32` returns the values verbatim, so `roll_percent` yields
/// `value % 100` and `below(n)` yields `value % n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source whose every percentile roll is 99: chance checks below 100%
    /// always fail and `below(n)` picks `99 % n`.
    pub fn never() -> Self {
        Self::new(vec![99])
    }

    /// A source whose every roll is 0: any nonzero chance succeeds.
    pub fn always() -> Self {
        Self::new(vec![0])
    }

    /// How many values have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
