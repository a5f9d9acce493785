//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a run (crit rolls, spawn angles, random targeting,
//! level-up offers) is drawn through [`Dice`], which feeds a per-run seed and a
//! monotonically increasing nonce into a stateless [`RngOracle`]. Replaying a
//! run with the same seed and the same inputs reproduces it exactly.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)` built from the top 24 bits.
    fn unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
/// - **Good quality**: Passes statistical tests (PractRand, TestU01)
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
/// - Implementation based on PCG-XSH-RR variant
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    ///
    /// This is where the "permutation" happens - transforms the LCG state
    /// into high-quality random output.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        // Random rotation provides the final permutation
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from game state components.
///
/// Combines multiple entropy sources to ensure unique seeds for each
/// random event in the game.
///
/// # Arguments
///
/// * `run_seed` - Base seed set at run start (for replay/determinism)
/// * `nonce` - Draw sequence number (increments each draw)
/// * `stream` - Independent stream, e.g. combat rolls vs. level-up offers
/// * `context` - Additional context for multiple rolls in the same draw
pub fn compute_seed(run_seed: u64, nonce: u64, stream: u32, context: u32) -> u64 {
    // Mix all inputs using simple hash combiners
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = run_seed;

    // Mix in nonce (draw sequence)
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);

    // Mix in stream
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);

    // Mix in context
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Stateful cursor over an [`RngOracle`].
///
/// Owns the run seed and the draw counter. Each draw consumes one nonce.
pub struct Dice {
    oracle: Box<dyn RngOracle>,
    seed: u64,
    nonce: u64,
    stream: u32,
}

impl Dice {
    pub fn new(oracle: Box<dyn RngOracle>, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
            stream: 0,
        }
    }

    /// Dice backed by [`PcgRng`].
    pub fn pcg(seed: u64) -> Self {
        Self::new(Box::new(PcgRng), seed)
    }

    /// Restarts the sequence with a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.nonce = 0;
    }

    /// Switches to another independent stream without resetting the nonce.
    pub fn set_stream(&mut self, stream: u32) {
        self.stream = stream;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, self.stream, 0);
        self.nonce = self.nonce.wrapping_add(1);
        seed
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = self.next_seed();
        self.oracle.next_u32(seed)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        let seed = self.next_seed();
        self.oracle.unit(seed)
    }

    /// True with probability `p` (clamped to `[0, 1]`).
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p.clamp(0.0, 1.0)
    }

    /// Uniform value in `[min, max)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_unit()
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }
}

impl std::fmt::Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dice")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .field("stream", &self.stream)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Dice::pcg(42);
        let mut b = Dice::pcg(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        assert_eq!(a.nonce(), 32);
    }

    #[test]
    fn unit_stays_in_half_open_interval() {
        let mut dice = Dice::pcg(7);
        for _ in 0..1_000 {
            let v = dice.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn index_of_empty_is_none() {
        let mut dice = Dice::pcg(1);
        assert_eq!(dice.index(0), None);
        assert!(dice.index(3).is_some_and(|i| i < 3));
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut dice = Dice::pcg(9);
        let first = dice.next_u32();
        dice.next_u32();
        dice.reseed(9);
        assert_eq!(dice.next_u32(), first);
    }
}
