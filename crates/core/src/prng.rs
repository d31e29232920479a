//! Seedable Xorshift64 PRNG for spawning and shuffling particles.
//!
//! The generator is deterministic across platforms, so a CLI run with the
//! same scene file and seed places every particle at the same coordinates.

use serde::{Deserialize, Serialize};

use crate::vector::Vec2;

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A zero seed is replaced with a fixed non-zero constant, since zero is a
/// fixed point of the recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform point in `[0, width) x [0, height)`.
    pub fn next_point(&mut self, width: f64, height: f64) -> Vec2 {
        let x = self.next_range(0.0, width);
        let y = self.next_range(0.0, height);
        Vec2::new(x, y)
    }
}
