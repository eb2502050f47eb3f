//! Mosquito lifecycle: flight, ageing, death and reproduction
//!
//! One pass per tick over the live population:
//!
//! ```text
//! rebuild pond occupancy from scratch
//! for each live mosquito (including newborns appended during the pass):
//!     fly
//!     age one hour, hunger one hour
//!     too old or starved?  → die: swap with last, shrink, pond occupancy - 1
//!     pond and population below capacity?  → maybe lay one offspring
//! ```
//!
//! Removal swaps the last mosquito into the vacated slot, which is then
//! processed at the same index. Iteration order is therefore not stable and
//! nothing downstream depends on it.

use crate::models::mosquito::Mosquito;
use crate::models::pond::PondId;
use crate::models::space::{Position, WorldBounds};
use crate::models::state::SimulationState;
use crate::movement::MosquitoFlight;
use crate::rng::RandomSource;
use tracing::trace;

/// Why a mosquito died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    OldAge,
    Starvation,
}

/// Thresholds and rates of the vector lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleRules {
    /// A mosquito older than this many hours dies
    pub max_age_hours: u32,
    /// A mosquito unfed for longer than this many hours dies
    pub max_unfed_hours: u32,
    /// Per-hour probability that a surviving mosquito lays one offspring
    pub reproduction_probability: f64,
    /// Maximum mosquitoes anchored to one pond
    pub max_per_pond: usize,
    /// Half-width of a newborn's offset from the pond centre
    pub spawn_jitter: f64,
}

impl LifecycleRules {
    /// Death check, made after the hour's ageing. Old age wins when both
    /// limits are exceeded.
    pub fn death_cause(&self, mosquito: &Mosquito) -> Option<DeathCause> {
        if mosquito.age_hours > self.max_age_hours {
            Some(DeathCause::OldAge)
        } else if mosquito.hours_unfed > self.max_unfed_hours {
            Some(DeathCause::Starvation)
        } else {
            None
        }
    }
}

/// Population changes during one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleOutcome {
    pub births: usize,
    pub deaths_old_age: usize,
    pub deaths_starvation: usize,
}

impl LifecycleOutcome {
    pub fn deaths(&self) -> usize {
        self.deaths_old_age + self.deaths_starvation
    }
}

/// A newborn at `pond`, whose centre is `home`, jittered by up to `jitter`
/// in each axis.
pub fn newborn<R: RandomSource + ?Sized>(
    pond: PondId,
    home: Position,
    jitter: f64,
    rng: &mut R,
) -> Mosquito {
    let position = home.offset_by(rng.offset(jitter), rng.offset(jitter));
    Mosquito::new(pond, home, position)
}

/// Run the lifecycle pass for one tick.
pub fn run_lifecycle<R: RandomSource + ?Sized>(
    state: &mut SimulationState,
    rules: &LifecycleRules,
    flight: &MosquitoFlight,
    bounds: &WorldBounds,
    rng: &mut R,
) -> LifecycleOutcome {
    let mut outcome = LifecycleOutcome::default();

    state.rebuild_occupancy();
    let capacity = state.mosquito_capacity();
    let (mosquitoes, ponds) = state.vectors_mut();

    let mut i = 0;
    while i < mosquitoes.len() {
        let mosquito = &mut mosquitoes[i];
        flight.apply(mosquito, bounds, rng);
        mosquito.age_one_hour();

        let pond_id = mosquito.pond();
        if let Some(cause) = rules.death_cause(mosquito) {
            ponds[pond_id.index()].remove_occupant();
            mosquitoes.swap_remove(i);
            match cause {
                DeathCause::OldAge => outcome.deaths_old_age += 1,
                DeathCause::Starvation => outcome.deaths_starvation += 1,
            }
            continue;
        }

        let pond = &mut ponds[pond_id.index()];
        if pond.occupancy() < rules.max_per_pond
            && mosquitoes.len() < capacity
            && rng.chance(rules.reproduction_probability)
        {
            mosquitoes.push(newborn(pond_id, pond.position(), rules.spawn_jitter, rng));
            pond.add_occupant();
            outcome.births += 1;
        }

        i += 1;
    }

    trace!(
        births = outcome.births,
        deaths_old_age = outcome.deaths_old_age,
        deaths_starvation = outcome.deaths_starvation,
        live = mosquitoes.len(),
        "lifecycle pass complete"
    );
    outcome
}
