//! Deterministic pseudo-random generator.
//!
//! A tiny linear-congruential generator (`seed = (seed * 9301 + 49297) mod 233280`)
//! used for k-means++ seeding. The recurrence is fixed so that clusterings are
//! reproducible bit-for-bit from an integer seed across runs and platforms.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Seeded linear-congruential generator producing values in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from an integer seed.
    ///
    /// The seed is reduced modulo 233280 up front; this yields the same
    /// sequence as running the recurrence on the unreduced seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Advance the generator and return the next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Draw an index in `[0, n)` as `floor(next() * n)`.
    ///
    /// Returns 0 for `n == 0` (the draw is still consumed).
    pub fn next_index(&mut self, n: usize) -> usize {
        let value = self.next();
        ((value * n as f64).floor() as usize).min(n.saturating_sub(1))
    }
}
