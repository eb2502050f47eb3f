//! Disease state machines
//!
//! Humans follow SEIR with temporary immunity; mosquitoes follow SI.
//!
//! # State machine (humans)
//!
//! ```text
//!            bite                incubation          infectious
//! Susceptible ───► Exposed{h} ──────────────► Infected{h} ──────────► Recovered{h}
//!      ▲                ▲                                                │   │
//!      │                └──────────────── bite ──────────────────────────┘   │
//!      └──────────────────────────── immunity wanes ─────────────────────────┘
//! ```
//!
//! The hour counter of the active compartment lives inside the variant, so a
//! human can never carry more than one running counter. Every entry into a
//! compartment starts its counter at zero.

use serde::{Deserialize, Serialize};

/// Dwell times of the timed human compartments, in hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseDurations {
    /// Hours spent Exposed before becoming Infected
    pub incubation_hours: u32,
    /// Hours spent Infected before Recovering
    pub infectious_hours: u32,
    /// Hours of immunity before returning to Susceptible
    pub immunity_hours: u32,
}

impl Default for DiseaseDurations {
    fn default() -> Self {
        Self {
            incubation_hours: 24 * 10,
            infectious_hours: 24 * 15,
            immunity_hours: 24 * 10,
        }
    }
}

/// Counting label of a human state, without its counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumanCompartment {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
}

/// A timed progression between human compartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanProgression {
    /// Exposed → Infected
    Onset,
    /// Infected → Recovered
    Recovery,
    /// Recovered → Susceptible
    WaningImmunity,
}

/// SEIR state of one human, carrying the hours spent in the current
/// compartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HumanState {
    #[default]
    Susceptible,
    Exposed {
        hours: u32,
    },
    Infected {
        hours: u32,
    },
    Recovered {
        hours: u32,
    },
}

impl HumanState {
    pub const fn exposed() -> Self {
        HumanState::Exposed { hours: 0 }
    }

    pub const fn infected() -> Self {
        HumanState::Infected { hours: 0 }
    }

    pub const fn recovered() -> Self {
        HumanState::Recovered { hours: 0 }
    }

    pub fn compartment(&self) -> HumanCompartment {
        match self {
            HumanState::Susceptible => HumanCompartment::Susceptible,
            HumanState::Exposed { .. } => HumanCompartment::Exposed,
            HumanState::Infected { .. } => HumanCompartment::Infected,
            HumanState::Recovered { .. } => HumanCompartment::Recovered,
        }
    }

    /// Hours spent in the current compartment; `None` while Susceptible.
    pub fn hours(&self) -> Option<u32> {
        match self {
            HumanState::Susceptible => None,
            HumanState::Exposed { hours }
            | HumanState::Infected { hours }
            | HumanState::Recovered { hours } => Some(*hours),
        }
    }

    /// Whether an infectious bite can expose this human. Recovered humans
    /// are not protected against reinfection by a bite.
    pub fn can_be_exposed(&self) -> bool {
        matches!(self, HumanState::Susceptible | HumanState::Recovered { .. })
    }

    pub fn is_infectious(&self) -> bool {
        matches!(self, HumanState::Infected { .. })
    }

    /// Advance the timed compartments by one hour.
    ///
    /// Increments the active counter and, once it reaches the compartment's
    /// threshold, moves to the next compartment with a fresh counter.
    /// Susceptible humans are untouched.
    pub fn advance(&mut self, durations: &DiseaseDurations) -> Option<HumanProgression> {
        match *self {
            HumanState::Susceptible => None,
            HumanState::Exposed { hours } => {
                let hours = hours.saturating_add(1);
                if hours >= durations.incubation_hours {
                    *self = HumanState::infected();
                    Some(HumanProgression::Onset)
                } else {
                    *self = HumanState::Exposed { hours };
                    None
                }
            }
            HumanState::Infected { hours } => {
                let hours = hours.saturating_add(1);
                if hours >= durations.infectious_hours {
                    *self = HumanState::recovered();
                    Some(HumanProgression::Recovery)
                } else {
                    *self = HumanState::Infected { hours };
                    None
                }
            }
            HumanState::Recovered { hours } => {
                let hours = hours.saturating_add(1);
                if hours >= durations.immunity_hours {
                    *self = HumanState::Susceptible;
                    Some(HumanProgression::WaningImmunity)
                } else {
                    *self = HumanState::Recovered { hours };
                    None
                }
            }
        }
    }
}

/// SI state of one mosquito. Infection is immediate and permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VectorState {
    #[default]
    Susceptible,
    Infected,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> DiseaseDurations {
        DiseaseDurations {
            incubation_hours: 2,
            infectious_hours: 3,
            immunity_hours: 1,
        }
    }

    #[test]
    fn test_susceptible_is_inert() {
        let mut state = HumanState::Susceptible;
        for _ in 0..100 {
            assert_eq!(state.advance(&short()), None);
        }
        assert_eq!(state, HumanState::Susceptible);
    }

    #[test]
    fn test_full_cycle_returns_to_susceptible() {
        let durations = short();
        let mut state = HumanState::exposed();
        let mut progressions = Vec::new();
        for _ in 0..6 {
            if let Some(p) = state.advance(&durations) {
                progressions.push(p);
            }
        }
        assert_eq!(
            progressions,
            vec![
                HumanProgression::Onset,
                HumanProgression::Recovery,
                HumanProgression::WaningImmunity
            ]
        );
        assert_eq!(state, HumanState::Susceptible);
    }

    #[test]
    fn test_recovered_can_be_exposed() {
        assert!(HumanState::recovered().can_be_exposed());
        assert!(HumanState::Susceptible.can_be_exposed());
        assert!(!HumanState::exposed().can_be_exposed());
        assert!(!HumanState::infected().can_be_exposed());
    }
}
