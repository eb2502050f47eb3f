//! Random-walk movement rules
//!
//! Humans take integer steps in both axes. Mosquitoes take fractional steps
//! but refuse any step that would leave the disc around their home pond.
//! Both are clamped to the world rectangle afterwards, so agents pressed
//! against an edge stay on it rather than wrapping.

use crate::models::human::Human;
use crate::models::mosquito::Mosquito;
use crate::models::space::WorldBounds;
use crate::rng::RandomSource;

/// Human walk: independent integer offsets in `[-step, step]` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanWalk {
    step: i64,
}

impl HumanWalk {
    pub fn new(step: u32) -> Self {
        Self {
            step: i64::from(step),
        }
    }

    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        human: &mut Human,
        bounds: &WorldBounds,
        rng: &mut R,
    ) {
        let dx = rng.range_inclusive(-self.step, self.step) as f64;
        let dy = rng.range_inclusive(-self.step, self.step) as f64;
        human.position = bounds.clamp(human.position.offset_by(dx, dy));
    }
}

/// Mosquito flight: fractional offsets in `[-step, step)` per axis, confined
/// to a disc of fixed radius around the mosquito's home.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosquitoFlight {
    step: f64,
    radius: f64,
}

impl MosquitoFlight {
    /// Flight radius is `min(width, height) * factor`, never below `minimum`.
    pub fn new(step: f64, bounds: &WorldBounds, factor: f64, minimum: f64) -> Self {
        Self {
            step,
            radius: flight_radius(bounds, factor, minimum),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_squared(&self) -> f64 {
        self.radius * self.radius
    }

    /// Try one step. Returns whether the mosquito moved; a rejected step
    /// leaves it where it was.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        mosquito: &mut Mosquito,
        bounds: &WorldBounds,
        rng: &mut R,
    ) -> bool {
        let dx = rng.offset(self.step);
        let dy = rng.offset(self.step);
        let candidate = mosquito.position.offset_by(dx, dy);
        if candidate.distance_squared(&mosquito.home()) > self.radius_squared() {
            return false;
        }
        mosquito.position = bounds.clamp(candidate);
        true
    }
}

/// Home-range radius shared by every mosquito.
pub fn flight_radius(bounds: &WorldBounds, factor: f64, minimum: f64) -> f64 {
    (bounds.min_side() * factor).max(minimum)
}
