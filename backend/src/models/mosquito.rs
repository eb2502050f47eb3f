//! Mosquito vector agent.

use crate::models::disease::VectorState;
use crate::models::pond::PondId;
use crate::models::space::Position;

/// A mosquito anchored to its breeding pond.
///
/// Mosquitoes are stored in a dense vector that reorders on removal, so a
/// mosquito has no stable identity across ticks; only its pond reference is
/// stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosquito {
    /// Current position
    pub position: Position,
    /// Centre of the flight range, fixed at birth
    home: Position,
    /// Pond this mosquito belongs to
    pond: PondId,
    pub state: VectorState,
    /// Hours since the last resolved feeding contact
    pub hours_unfed: u32,
    /// Hours alive, never reset
    pub age_hours: u32,
}

impl Mosquito {
    /// A newborn susceptible mosquito at `position`, flying around `home`.
    pub fn new(pond: PondId, home: Position, position: Position) -> Self {
        Self {
            position,
            home,
            pond,
            state: VectorState::Susceptible,
            hours_unfed: 0,
            age_hours: 0,
        }
    }

    pub fn home(&self) -> Position {
        self.home
    }

    pub fn pond(&self) -> PondId {
        self.pond
    }

    pub fn is_infected(&self) -> bool {
        self.state == VectorState::Infected
    }

    /// Become infected. Counts as a feeding, so the hunger clock restarts.
    pub fn infect(&mut self) {
        self.state = VectorState::Infected;
        self.hours_unfed = 0;
    }

    /// Record a resolved contact with a host.
    pub fn feed(&mut self) {
        self.hours_unfed = 0;
    }

    /// Add one hour of age and hunger.
    pub fn age_one_hour(&mut self) {
        self.age_hours = self.age_hours.saturating_add(1);
        self.hours_unfed = self.hours_unfed.saturating_add(1);
    }
}
