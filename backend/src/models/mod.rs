//! Domain models for the vector simulator

pub mod disease;
pub mod human;
pub mod mosquito;
pub mod pond;
pub mod space;
pub mod state;

// Re-exports
pub use disease::{DiseaseDurations, HumanCompartment, HumanProgression, HumanState, VectorState};
pub use human::Human;
pub use mosquito::Mosquito;
pub use pond::{Pond, PondId};
pub use space::{Position, WorldBounds};
pub use state::SimulationState;
