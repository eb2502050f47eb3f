//! Breeding ponds.

use crate::models::space::Position;
use std::fmt;

/// Index of a pond in the pond registry.
///
/// Ponds are created once and never removed, so the index stays valid for the
/// whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PondId(pub(crate) usize);

impl PondId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pond_{}", self.0)
    }
}

/// An immobile breeding site.
#[derive(Debug, Clone, PartialEq)]
pub struct Pond {
    position: Position,
    /// Mosquitoes currently anchored here. Rebuilt at the start of each
    /// lifecycle phase and only meaningful within it.
    occupancy: usize,
}

impl Pond {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            occupancy: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub(crate) fn reset_occupancy(&mut self) {
        self.occupancy = 0;
    }

    pub(crate) fn add_occupant(&mut self) {
        self.occupancy += 1;
    }

    pub(crate) fn remove_occupant(&mut self) {
        self.occupancy = self.occupancy.saturating_sub(1);
    }
}
