//! Vector–host contact and transmission
//!
//! Runs only while the daily biting window is open. Each mosquito samples a
//! few humans uniformly at random (with replacement); the first sampled human
//! within the contagion radius resolves a contact and ends that mosquito's
//! search for the hour. The first in-range sample wins, which is not
//! necessarily the nearest human.
//!
//! On a resolved contact, in this order:
//! 1. infected mosquito + susceptible/recovered human → human exposed with
//!    probability `vector_to_human`
//! 2. susceptible mosquito + infected human → mosquito infected with
//!    probability `human_to_vector`
//! 3. the mosquito has fed either way
//!
//! Both rules are checked independently; they cannot both apply to one pair
//! because their state requirements on the mosquito are disjoint.

use crate::core::time::HOURS_PER_DAY;
use crate::models::disease::HumanState;
use crate::models::state::SimulationState;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Daily hours during which mosquitoes bite.
///
/// The window opens at `start_hour` and lasts `duration_hours`, wrapping
/// across midnight.
///
/// # Example
/// ```
/// use vectorsim_core::BitingWindow;
///
/// let window = BitingWindow { start_hour: 18, duration_hours: 16 };
/// assert!(window.is_open(18));
/// assert!(window.is_open(9));
/// assert!(!window.is_open(10));
/// assert!(!window.is_open(17));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitingWindow {
    /// Hour of day (0-23) at which biting starts
    pub start_hour: usize,
    /// Number of consecutive biting hours
    pub duration_hours: usize,
}

impl Default for BitingWindow {
    fn default() -> Self {
        Self {
            start_hour: 18,
            duration_hours: 16,
        }
    }
}

impl BitingWindow {
    /// Whether biting happens at `hour_of_day`.
    pub fn is_open(&self, hour_of_day: usize) -> bool {
        let since_start =
            (hour_of_day % HOURS_PER_DAY + HOURS_PER_DAY - self.start_hour % HOURS_PER_DAY)
                % HOURS_PER_DAY;
        since_start < self.duration_hours
    }
}

/// Contact parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    /// Distance within which a sampled human counts as bitten
    pub contagion_radius: f64,

    /// Probability that an infected mosquito exposes a human it bites
    pub vector_to_human: f64,

    /// Probability that a mosquito biting an infected human becomes infected
    pub human_to_vector: f64,

    /// Humans sampled per mosquito per biting hour
    pub contact_attempts: usize,

    pub biting_window: BitingWindow,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            contagion_radius: 11.0,
            vector_to_human: 0.20,
            human_to_vector: 0.73,
            contact_attempts: 12,
            biting_window: BitingWindow::default(),
        }
    }
}

/// What happened during one contact phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Mosquitoes that found a host in range
    pub contacts: usize,
    /// Humans moved to Exposed by a bite
    pub human_exposures: usize,
    /// Mosquitoes infected by a bite
    pub vector_infections: usize,
}

/// Run one hour of biting over every live mosquito.
///
/// The caller decides whether the window is open; this always runs.
pub fn run_contacts<R: RandomSource + ?Sized>(
    state: &mut SimulationState,
    config: &TransmissionConfig,
    rng: &mut R,
) -> ContactOutcome {
    let mut outcome = ContactOutcome::default();
    let (humans, mosquitoes) = state.hosts_and_vectors_mut();
    if humans.is_empty() {
        return outcome;
    }

    let radius_sq = config.contagion_radius * config.contagion_radius;
    let attempts = config.contact_attempts.min(humans.len());

    for mosquito in mosquitoes.iter_mut() {
        for _ in 0..attempts {
            let pick = rng.index(humans.len());
            let host = &mut humans[pick];
            if mosquito.position.distance_squared(&host.position) > radius_sq {
                continue;
            }

            if mosquito.is_infected()
                && host.state.can_be_exposed()
                && rng.chance(config.vector_to_human)
            {
                host.state = HumanState::exposed();
                outcome.human_exposures += 1;
            }
            if !mosquito.is_infected()
                && host.state.is_infectious()
                && rng.chance(config.human_to_vector)
            {
                mosquito.infect();
                outcome.vector_infections += 1;
            }
            mosquito.feed();
            outcome.contacts += 1;
            break;
        }
    }

    trace!(
        contacts = outcome.contacts,
        human_exposures = outcome.human_exposures,
        vector_infections = outcome.vector_infections,
        "contact phase complete"
    );
    outcome
}
