//! Simulation clock
//!
//! The simulation advances in discrete ticks of one simulated hour. Ticks are
//! grouped into days so that the daily biting window and the end-of-day series
//! can be derived from the tick index alone.

use serde::{Deserialize, Serialize};

/// Hours in one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Manages simulation time in discrete hourly ticks
///
/// # Example
/// ```
/// use vectorsim_core::TimeManager;
///
/// let mut time = TimeManager::new(24);
/// assert_eq!(time.current_tick(), 0);
/// assert_eq!(time.current_day(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// assert_eq!(time.hour_of_day(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Number of ticks in one day
    ticks_per_day: usize,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero.
    pub fn new(ticks_per_day: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        Self {
            current_tick: 0,
            ticks_per_day,
        }
    }

    /// Clock with one tick per hour.
    pub fn hourly() -> Self {
        Self::new(HOURS_PER_DAY)
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the current day (0-indexed)
    ///
    /// # Example
    /// ```
    /// use vectorsim_core::TimeManager;
    ///
    /// let mut time = TimeManager::hourly();
    /// for _ in 0..24 {
    ///     time.advance_tick();
    /// }
    /// assert_eq!(time.current_day(), 1);
    /// ```
    pub fn current_day(&self) -> usize {
        self.current_tick / self.ticks_per_day
    }

    /// Get the tick within the current day (0-indexed)
    ///
    /// With an hourly clock this is the hour of day.
    pub fn hour_of_day(&self) -> usize {
        self.current_tick % self.ticks_per_day
    }

    /// Check if current tick is the last tick of the day
    pub fn is_end_of_day(&self) -> bool {
        self.hour_of_day() == self.ticks_per_day - 1
    }
}
