//! Human host agent.

use crate::models::disease::HumanState;
use crate::models::space::Position;

/// A mobile human host.
///
/// The human population has a fixed size for the entire run; humans are
/// created once during seeding and never added or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Human {
    pub position: Position,
    pub state: HumanState,
}

impl Human {
    /// A susceptible human at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            state: HumanState::Susceptible,
        }
    }

    pub fn with_state(position: Position, state: HumanState) -> Self {
        Self { position, state }
    }
}
