//! Random Number Sources
//!
//! Level generation never calls a global RNG. It takes a [`RandomSource`],
//! so the server can hand it an entropy-seeded generator while tests hand it
//! a fixed seed or a scripted sequence.

use serde::{Serialize, Deserialize};

/// Capability used by level and hazard generation.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[0, max)`, computed as `floor(u * max)`.
    ///
    /// Returns 0 when `max` is 0.
    fn next_below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let scaled = (self.next_unit() * f64::from(max)).floor() as u32;
        // Guards against a source that returns exactly 1.0
        scaled.min(max - 1)
    }
}

/// Seedable PRNG using the Xorshift128+ family.
///
/// Given the same seed it yields the same sequence on every platform, which
/// lets a level layout be reproduced from the seed logged at startup.
///
/// # Example
///
/// ```
/// use rover_scout::core::rng::{DeterministicRng, RandomSource};
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// assert!(a.next_unit() < 1.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    seed: u64,
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, so sequential seeds
    /// still produce unrelated streams.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // State must never be all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { seed, state }
    }

    /// Create an RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

impl RandomSource for DeterministicRng {
    /// Top 53 bits of the next output, scaled into `[0, 1)`.
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================
