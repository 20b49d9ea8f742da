//! Random Number Generator.

use crate::pbrt::*;

/// Largest 32-bit float below 1.0.
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 pseudo-random number generator used to draw wavelength samples.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` seeded with the given sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (sequence_index << 1) | 1,
        };
        rng.uniform_u32();
        rng.state = rng.state.wrapping_add(PCG32_DEFAULT_STATE);
        rng.uniform_u32();
        rng
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_u32() as Float * hexf32!("0x1.0p-32")).min(ONE_MINUS_EPSILON)
    }

    /// Returns `n` uniformly distributed values in [0.0, 1.0).
    ///
    /// * `n` - Number of values.
    pub fn uniform_floats(&mut self, n: usize) -> Vec<Float> {
        (0..n).map(|_| self.uniform_float()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RNG::new(7);
        let mut b = RNG::new(7);
        assert_eq!(a.uniform_floats(16), b.uniform_floats(16));
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = RNG::new(1);
        let mut b = RNG::new(2);
        assert_ne!(a.uniform_floats(8), b.uniform_floats(8));
    }

    proptest! {
        #[test]
        fn uniform_float_in_unit_interval(seed in 0u64..10_000u64) {
            let mut rng = RNG::new(seed);
            for u in rng.uniform_floats(64) {
                prop_assert!((0.0..1.0).contains(&u));
            }
        }
    }
}
