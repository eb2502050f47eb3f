//! Initial population
//!
//! Builds the starting [`SimulationState`] from a configuration. Draws are
//! taken in a fixed order so that a seed always yields the same world:
//!
//! 1. pond positions (integer coordinates inside the margin)
//! 2. mosquitoes per pond, each jittered around its pond
//! 3. human positions, clustered near a random pond or uniform on the map
//! 4. forced human compartments: Infected, then Exposed, then Recovered
//!    (indices drawn with replacement; a later assignment overwrites an
//!    earlier one)
//! 5. forced Infected mosquitoes

use crate::lifecycle::newborn;
use crate::models::disease::HumanState;
use crate::models::human::Human;
use crate::models::mosquito::Mosquito;
use crate::models::pond::{Pond, PondId};
use crate::models::space::Position;
use crate::models::state::SimulationState;
use crate::orchestrator::{SimulationConfig, SimulationError};
use crate::rng::RandomSource;
use tracing::{debug, info};

/// Build the starting state. `config` must already be validated.
pub fn populate<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationState, SimulationError> {
    let ponds = place_ponds(config, rng)?;
    let mosquitoes = seed_mosquitoes(config, &ponds, rng)?;
    let humans = place_humans(config, &ponds, rng)?;

    let mut state = SimulationState::new(humans, ponds, config.mosquito_capacity())?;
    for mosquito in mosquitoes {
        state.add_mosquito(mosquito);
    }

    force_human_states(config, &mut state, rng);
    force_infected_mosquitoes(config, &mut state, rng);

    info!(
        humans = state.num_humans(),
        ponds = state.num_ponds(),
        mosquitoes = state.num_mosquitoes(),
        mosquito_capacity = state.mosquito_capacity(),
        "initial population seeded"
    );
    Ok(state)
}

fn reserve<T>(what: &'static str, requested: usize) -> Result<Vec<T>, SimulationError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(requested)
        .map_err(|_| SimulationError::Allocation { what, requested })?;
    Ok(buffer)
}

fn place_ponds<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Pond>, SimulationError> {
    let count = config.vectors.pond_count;
    let mut ponds = reserve("ponds", count)?;
    if count == 0 {
        return Ok(ponds);
    }

    let margin = u64::from(config.world.pond_margin);
    let span_x = u64::from(config.world.width) - 2 * margin;
    let span_y = u64::from(config.world.height) - 2 * margin;
    for _ in 0..count {
        let x = (margin + rng.below(span_x)) as f64;
        let y = (margin + rng.below(span_y)) as f64;
        ponds.push(Pond::new(Position::new(x, y)));
    }
    debug!(ponds = ponds.len(), "ponds placed");
    Ok(ponds)
}

fn seed_mosquitoes<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    ponds: &[Pond],
    rng: &mut R,
) -> Result<Vec<Mosquito>, SimulationError> {
    let vectors = &config.vectors;
    let capacity = config.mosquito_capacity();
    let upper_bound = capacity.min(ponds.len().saturating_mul(vectors.initial_per_pond_max));
    let mut mosquitoes = reserve("initial mosquitoes", upper_bound)?;

    let lo = per_pond_bound("initial_per_pond_min", vectors.initial_per_pond_min)?;
    let hi = per_pond_bound("initial_per_pond_max", vectors.initial_per_pond_max)?;
    for (index, pond) in ponds.iter().enumerate() {
        let n = rng.range_inclusive(lo, hi) as usize;
        for _ in 0..n {
            if mosquitoes.len() >= capacity {
                break;
            }
            mosquitoes.push(newborn(PondId(index), pond.position(), vectors.spawn_jitter, rng));
        }
    }
    Ok(mosquitoes)
}

fn per_pond_bound(name: &str, value: usize) -> Result<i64, SimulationError> {
    i64::try_from(value)
        .map_err(|_| SimulationError::InvalidConfig(format!("{name} {value} is out of range")))
}

fn place_humans<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    ponds: &[Pond],
    rng: &mut R,
) -> Result<Vec<Human>, SimulationError> {
    let population = config.humans.population;
    let mut humans = reserve("humans", population)?;
    let bounds = config.bounds();
    let spread = config.humans.cluster_spread;

    for _ in 0..population {
        let near_pond = rng.chance(config.humans.cluster_probability) && !ponds.is_empty();
        let position = if near_pond {
            let pond = ponds[rng.index(ponds.len())].position();
            bounds.clamp(pond.offset_by(rng.offset(spread), rng.offset(spread)))
        } else {
            Position::new(
                rng.next_f64() * bounds.width(),
                rng.next_f64() * bounds.height(),
            )
        };
        humans.push(Human::new(position));
    }
    Ok(humans)
}

fn force_human_states<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    state: &mut SimulationState,
    rng: &mut R,
) {
    let humans = state.humans_mut();
    if humans.is_empty() {
        return;
    }
    let seeds = [
        (config.humans.seed_infected, HumanState::infected()),
        (config.humans.seed_exposed, HumanState::exposed()),
        (config.humans.seed_recovered, HumanState::recovered()),
    ];
    for (count, seeded) in seeds {
        for _ in 0..count {
            let pick = rng.index(humans.len());
            humans[pick].state = seeded;
        }
    }
}

fn force_infected_mosquitoes<R: RandomSource + ?Sized>(
    config: &SimulationConfig,
    state: &mut SimulationState,
    rng: &mut R,
) {
    let mosquitoes = state.mosquitoes_mut();
    let draws = config.vectors.seed_infected.min(mosquitoes.len());
    for _ in 0..draws {
        let pick = rng.index(mosquitoes.len());
        mosquitoes[pick].infect();
    }
}
