//! Replays a recorded sequence of raw draws.

use super::RandomSource;

/// A [`RandomSource`] that cycles through a fixed list of raw values.
///
/// Useful to pin a phase to known outcomes: `u64::MAX` maps to a uniform
/// draw just below 1.0 (every `chance(p < 1)` fails) and `0` maps to 0.0
/// (every `chance(p > 0)` succeeds, every `below(n)` returns 0).
///
/// # Example
/// ```
/// use vectorsim_core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(vec![0, 5]);
/// assert_eq!(rng.below(4), 0);
/// assert_eq!(rng.below(4), 1);
/// assert_eq!(rng.draws(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRng {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Source that always returns the same raw value.
    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}
