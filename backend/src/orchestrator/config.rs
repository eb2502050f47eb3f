//! Simulation configuration
//!
//! Every parameter of a run, grouped by concern. `Default` carries the
//! reference scenario: a 600 × 1100 map, 140 000 humans and 13 200 ponds,
//! simulated hourly for one year.
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON document only
//! needs the fields it changes:
//!
//! ```rust
//! use vectorsim_core::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(
//!     r#"{ "rng_seed": 7, "humans": { "population": 500 } }"#,
//! ).unwrap();
//! assert_eq!(config.rng_seed, 7);
//! assert_eq!(config.humans.population, 500);
//! assert_eq!(config.horizon_hours, 8760);
//! ```

use crate::core::time::HOURS_PER_DAY;
use crate::lifecycle::LifecycleRules;
use crate::models::disease::DiseaseDurations;
use crate::models::space::WorldBounds;
use crate::movement::{flight_radius, HumanWalk, MosquitoFlight};
use crate::orchestrator::SimulationError;
use crate::transmission::TransmissionConfig;
use serde::{Deserialize, Serialize};

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Number of hourly ticks to simulate
    pub horizon_hours: usize,

    pub world: WorldConfig,
    pub humans: HumanConfig,
    pub vectors: VectorConfig,
    pub transmission: TransmissionConfig,
    pub output: OutputConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rng_seed: 0,
            horizon_hours: 8760,
            world: WorldConfig::default(),
            humans: HumanConfig::default(),
            vectors: VectorConfig::default(),
            transmission: TransmissionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Map geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Ponds are placed at least this far from every edge
    pub pond_margin: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 1100,
            pond_margin: 30,
        }
    }
}

/// Human population and disease course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanConfig {
    pub population: usize,

    /// Largest per-axis step of the hourly walk
    pub step: u32,

    /// Probability that a human starts near a random pond instead of
    /// anywhere on the map
    pub cluster_probability: f64,

    /// Half-width of the square around a pond in which clustered humans start
    pub cluster_spread: f64,

    pub durations: DiseaseDurations,

    /// Humans forced into each compartment at start
    pub seed_exposed: usize,
    pub seed_infected: usize,
    pub seed_recovered: usize,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            population: 140_000,
            step: 3,
            cluster_probability: 0.6,
            cluster_spread: 40.0,
            durations: DiseaseDurations::default(),
            seed_exposed: 80,
            seed_infected: 120,
            seed_recovered: 50,
        }
    }
}

/// Mosquito ecology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    pub pond_count: usize,

    /// Range (inclusive) of mosquitoes seeded at each pond
    pub initial_per_pond_min: usize,
    pub initial_per_pond_max: usize,

    /// Maximum mosquitoes anchored to one pond
    pub max_per_pond: usize,

    /// Maximum live mosquitoes; defaults to `pond_count * max_per_pond`
    pub max_total: Option<usize>,

    /// Lifespan in hours
    pub max_age_hours: u32,

    /// Hours a mosquito survives without a feeding contact
    pub max_unfed_hours: u32,

    /// Per-hour probability of laying one offspring
    pub reproduction_probability: f64,

    /// Flight radius as a fraction of the shorter map side
    pub flight_radius_factor: f64,
    /// Floor of the flight radius
    pub min_flight_radius: f64,

    /// Largest per-axis step of the hourly flight
    pub step: f64,

    /// Half-width of a newborn's offset from its pond
    pub spawn_jitter: f64,

    /// Mosquitoes forced into Infected at start
    pub seed_infected: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            pond_count: 13_200,
            initial_per_pond_min: 0,
            initial_per_pond_max: 15,
            max_per_pond: 15,
            max_total: None,
            max_age_hours: 15 * 24,
            max_unfed_hours: 48,
            reproduction_probability: 0.20,
            flight_radius_factor: 0.15,
            min_flight_radius: 5.0,
            step: 2.5,
            spawn_jitter: 2.0,
            seed_infected: 200,
        }
    }
}

/// Output cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit a row every this many ticks
    pub sample_interval: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { sample_interval: 4 }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) JSON document. Missing fields keep their
    /// defaults. The result is not validated.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world.width, self.world.height)
    }

    /// Maximum live mosquitoes.
    pub fn mosquito_capacity(&self) -> usize {
        self.vectors
            .max_total
            .unwrap_or_else(|| self.vectors.pond_count.saturating_mul(self.vectors.max_per_pond))
    }

    pub fn flight_radius(&self) -> f64 {
        flight_radius(
            &self.bounds(),
            self.vectors.flight_radius_factor,
            self.vectors.min_flight_radius,
        )
    }

    pub fn human_walk(&self) -> HumanWalk {
        HumanWalk::new(self.humans.step)
    }

    pub fn mosquito_flight(&self) -> MosquitoFlight {
        MosquitoFlight::new(
            self.vectors.step,
            &self.bounds(),
            self.vectors.flight_radius_factor,
            self.vectors.min_flight_radius,
        )
    }

    pub fn lifecycle_rules(&self) -> LifecycleRules {
        LifecycleRules {
            max_age_hours: self.vectors.max_age_hours,
            max_unfed_hours: self.vectors.max_unfed_hours,
            reproduction_probability: self.vectors.reproduction_probability,
            max_per_pond: self.vectors.max_per_pond,
            spawn_jitter: self.vectors.spawn_jitter,
        }
    }

    /// Check every parameter before anything is allocated.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let world = &self.world;
        if world.width == 0 || world.height == 0 {
            return invalid("world width and height must be > 0");
        }
        if self.horizon_hours == 0 {
            return invalid("horizon_hours must be > 0");
        }
        if self.output.sample_interval == 0 {
            return invalid("output.sample_interval must be > 0");
        }

        if self.vectors.pond_count > 0 {
            let margin = u64::from(world.pond_margin) * 2;
            if margin >= u64::from(world.width) || margin >= u64::from(world.height) {
                return invalid(format!(
                    "pond_margin {} leaves no room for ponds on a {}x{} map",
                    world.pond_margin, world.width, world.height
                ));
            }
            if f64::from(world.pond_margin) < self.vectors.spawn_jitter {
                return invalid(format!(
                    "pond_margin {} is smaller than spawn_jitter {}; \
                     newborns could start off the map",
                    world.pond_margin, self.vectors.spawn_jitter
                ));
            }
        }

        check_probability("humans.cluster_probability", self.humans.cluster_probability)?;
        check_probability(
            "vectors.reproduction_probability",
            self.vectors.reproduction_probability,
        )?;
        check_probability("transmission.vector_to_human", self.transmission.vector_to_human)?;
        check_probability("transmission.human_to_vector", self.transmission.human_to_vector)?;

        check_distance("humans.cluster_spread", self.humans.cluster_spread)?;
        check_distance("vectors.step", self.vectors.step)?;
        check_distance("vectors.spawn_jitter", self.vectors.spawn_jitter)?;
        check_distance("vectors.flight_radius_factor", self.vectors.flight_radius_factor)?;
        check_distance("vectors.min_flight_radius", self.vectors.min_flight_radius)?;
        check_distance("transmission.contagion_radius", self.transmission.contagion_radius)?;

        let window = &self.transmission.biting_window;
        if window.start_hour >= HOURS_PER_DAY {
            return invalid(format!(
                "biting_window.start_hour must be < {}, got {}",
                HOURS_PER_DAY, window.start_hour
            ));
        }
        if window.duration_hours > HOURS_PER_DAY {
            return invalid(format!(
                "biting_window.duration_hours must be <= {}, got {}",
                HOURS_PER_DAY, window.duration_hours
            ));
        }

        let vectors = &self.vectors;
        if vectors.initial_per_pond_min > vectors.initial_per_pond_max {
            return invalid(format!(
                "initial_per_pond_min {} exceeds initial_per_pond_max {}",
                vectors.initial_per_pond_min, vectors.initial_per_pond_max
            ));
        }
        if vectors.initial_per_pond_max > vectors.max_per_pond {
            return invalid(format!(
                "initial_per_pond_max {} exceeds max_per_pond {}",
                vectors.initial_per_pond_max, vectors.max_per_pond
            ));
        }
        // Per-pond counts are drawn as signed integers.
        if i64::try_from(vectors.max_per_pond).is_err() {
            return invalid(format!(
                "max_per_pond {} exceeds {}",
                vectors.max_per_pond,
                i64::MAX
            ));
        }

        // Worst-case newborn offset is the jitter along both axes.
        let reach = vectors.spawn_jitter * std::f64::consts::SQRT_2;
        if reach > self.flight_radius() {
            return invalid(format!(
                "spawn_jitter {} can place newborns outside the flight radius {}",
                vectors.spawn_jitter,
                self.flight_radius()
            ));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Result<(), SimulationError> {
    Err(SimulationError::InvalidConfig(message.into()))
}

fn check_probability(name: &str, value: f64) -> Result<(), SimulationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        invalid(format!("{name} must be within [0, 1], got {value}"))
    }
}

fn check_distance(name: &str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(format!("{name} must be finite and >= 0, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_capacity_and_radius() {
        let config = SimulationConfig::default();
        assert_eq!(config.mosquito_capacity(), 13_200 * 15);
        assert!((config.flight_radius() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_capacity_overrides_product() {
        let mut config = SimulationConfig::default();
        config.vectors.max_total = Some(10);
        assert_eq!(config.mosquito_capacity(), 10);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let mut config = SimulationConfig::default();
        config.transmission.human_to_vector = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("human_to_vector"));

        config.transmission.human_to_vector = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_window_start() {
        let mut config = SimulationConfig::default();
        config.transmission.biting_window.start_hour = 24;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_margin_without_room() {
        let mut config = SimulationConfig::default();
        config.world.width = 60;
        assert!(config.validate().is_err());
        config.vectors.pond_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_initial_above_pond_cap() {
        let mut config = SimulationConfig::default();
        config.vectors.initial_per_pond_max = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_per_pond_counts_beyond_signed_range() {
        let mut config = SimulationConfig::default();
        config.vectors.pond_count = 1;
        config.vectors.max_total = Some(5);
        config.vectors.max_per_pond = usize::MAX;
        config.vectors.initial_per_pond_max = usize::MAX;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
        assert!(err.to_string().contains("max_per_pond"));

        config.vectors.max_per_pond = i64::MAX as usize;
        config.vectors.initial_per_pond_max = 15;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut config = SimulationConfig::default();
        config.rng_seed = 42;
        config.vectors.max_total = Some(1000);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_unparseable_json_is_reported() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimulationError::ConfigParse(_)));
    }
}
