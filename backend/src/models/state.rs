//! Simulation State
//!
//! Holds every agent of the simulation: the fixed human population, the pond
//! registry and the variable mosquito population.
//!
//! # Critical Invariants
//!
//! 1. **Constant hosts**: the number of humans never changes after construction
//! 2. **Valid anchors**: every mosquito references an existing pond
//! 3. **Bounded vectors**: the live mosquito count never exceeds `mosquito_capacity`
//! 4. **Derived occupancy**: pond occupancy is recomputed from the mosquito
//!    list, never maintained as an inverse collection

use crate::models::human::Human;
use crate::models::mosquito::Mosquito;
use crate::models::pond::{Pond, PondId};
use crate::orchestrator::SimulationError;

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use vectorsim_core::models::{Human, Mosquito, Pond, Position, SimulationState};
///
/// let humans = vec![Human::new(Position::new(1.0, 1.0))];
/// let ponds = vec![Pond::new(Position::new(5.0, 5.0))];
/// let mut state = SimulationState::new(humans, ponds, 10).unwrap();
///
/// let pond = state.pond_id(0).unwrap();
/// let home = state.pond(pond).position();
/// assert!(state.add_mosquito(Mosquito::new(pond, home, home)));
/// assert_eq!(state.num_mosquitoes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Human hosts; fixed size
    humans: Vec<Human>,

    /// Pond registry; fixed size
    ponds: Vec<Pond>,

    /// Live mosquitoes, dense, reordered by removals
    mosquitoes: Vec<Mosquito>,

    /// Maximum number of live mosquitoes
    mosquito_capacity: usize,
}

impl SimulationState {
    /// Create a state with the given hosts and ponds and room for
    /// `mosquito_capacity` mosquitoes.
    ///
    /// The mosquito buffer is reserved up front so that births never
    /// reallocate mid-run; a failed reservation is reported as
    /// [`SimulationError::Allocation`].
    pub fn new(
        humans: Vec<Human>,
        ponds: Vec<Pond>,
        mosquito_capacity: usize,
    ) -> Result<Self, SimulationError> {
        let mut mosquitoes = Vec::new();
        mosquitoes
            .try_reserve_exact(mosquito_capacity)
            .map_err(|_| SimulationError::Allocation {
                what: "mosquitoes",
                requested: mosquito_capacity,
            })?;

        Ok(Self {
            humans,
            ponds,
            mosquitoes,
            mosquito_capacity,
        })
    }

    // ------------------------------------------------------------------
    // Humans
    // ------------------------------------------------------------------

    pub fn humans(&self) -> &[Human] {
        &self.humans
    }

    /// Mutable access to the hosts. The slice cannot grow or shrink.
    pub fn humans_mut(&mut self) -> &mut [Human] {
        &mut self.humans
    }

    pub fn num_humans(&self) -> usize {
        self.humans.len()
    }

    // ------------------------------------------------------------------
    // Ponds
    // ------------------------------------------------------------------

    pub fn ponds(&self) -> &[Pond] {
        &self.ponds
    }

    pub fn num_ponds(&self) -> usize {
        self.ponds.len()
    }

    /// Id of the pond at `index`, if it exists.
    pub fn pond_id(&self, index: usize) -> Option<PondId> {
        (index < self.ponds.len()).then_some(PondId(index))
    }

    /// Pond by id. Ids are only handed out for existing ponds.
    pub fn pond(&self, id: PondId) -> &Pond {
        &self.ponds[id.0]
    }

    /// Recount mosquitoes per pond from scratch into the ponds' occupancy.
    pub fn rebuild_occupancy(&mut self) {
        for pond in &mut self.ponds {
            pond.reset_occupancy();
        }
        for mosquito in &self.mosquitoes {
            self.ponds[mosquito.pond().0].add_occupant();
        }
    }

    /// Mosquitoes per pond, counted from the live population without touching
    /// the stored occupancy.
    pub fn occupancy_census(&self) -> Vec<usize> {
        let mut census = vec![0; self.ponds.len()];
        for mosquito in &self.mosquitoes {
            census[mosquito.pond().0] += 1;
        }
        census
    }

    // ------------------------------------------------------------------
    // Mosquitoes
    // ------------------------------------------------------------------

    pub fn mosquitoes(&self) -> &[Mosquito] {
        &self.mosquitoes
    }

    pub fn mosquitoes_mut(&mut self) -> &mut [Mosquito] {
        &mut self.mosquitoes
    }

    pub fn num_mosquitoes(&self) -> usize {
        self.mosquitoes.len()
    }

    pub fn mosquito_capacity(&self) -> usize {
        self.mosquito_capacity
    }

    pub fn has_mosquito_room(&self) -> bool {
        self.mosquitoes.len() < self.mosquito_capacity
    }

    /// Append a mosquito. Returns `false` (and drops it) when the population
    /// is at capacity or its pond does not exist.
    pub fn add_mosquito(&mut self, mosquito: Mosquito) -> bool {
        if !self.has_mosquito_room() || mosquito.pond().0 >= self.ponds.len() {
            return false;
        }
        self.mosquitoes.push(mosquito);
        true
    }

    /// Mutable views used by the lifecycle pass, which grows and shrinks the
    /// population while adjusting pond occupancy.
    pub(crate) fn vectors_mut(&mut self) -> (&mut Vec<Mosquito>, &mut [Pond]) {
        (&mut self.mosquitoes, &mut self.ponds)
    }

    /// Hosts and vectors together, for the contact phase.
    pub(crate) fn hosts_and_vectors_mut(&mut self) -> (&mut [Human], &mut [Mosquito]) {
        (&mut self.humans, &mut self.mosquitoes)
    }
}
