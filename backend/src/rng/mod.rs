//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through a [`RandomSource`],
//! owned by the orchestrator and passed explicitly to every phase. Draw order
//! determines reproducibility.

mod scripted;
mod xorshift;

pub use scripted::ScriptedRng;
pub use xorshift::RngManager;

/// A uniform stream of raw 64-bit draws plus the derived samplers the
/// simulation needs.
///
/// Only [`RandomSource::next_u64`] is required; every other sampler is
/// derived from it so that a substituted source (see [`ScriptedRng`]) drives
/// exactly the same decisions as the production generator.
pub trait RandomSource {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform f64 in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in [0, bound).
    ///
    /// # Panics
    /// Panics if `bound` is zero.
    fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        self.next_u64() % bound
    }

    /// Uniform index into a collection of length `len`.
    fn index(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }

    /// Uniform integer in [lo, hi], both inclusive.
    ///
    /// # Panics
    /// Panics if `lo > hi`.
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "lo must not exceed hi");
        let span = (hi - lo) as u64 + 1;
        lo + self.below(span) as i64
    }

    /// Uniform f64 in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Symmetric offset in [-half_width, half_width).
    fn offset(&mut self, half_width: f64) -> f64 {
        self.uniform(-half_width, half_width)
    }

    /// Bernoulli trial: true with probability `p`.
    ///
    /// `p <= 0.0` never succeeds and `p >= 1.0` always does.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
