//! Vector Simulator Core - Rust Engine
//!
//! Spatial agent-based model of a mosquito-borne disease with deterministic
//! execution. Humans follow an SEIRS cycle driven by per-agent hour counters;
//! mosquitoes are born at ponds, fly within a radius of home, starve, age,
//! reproduce, and bite during a daily window.
//!
//! # Architecture
//!
//! - **core**: Hourly clock
//! - **rng**: Deterministic random number generation
//! - **models**: Domain types (Human, Mosquito, Pond, State)
//! - **seeding**: Initial population
//! - **movement**: Human walks and tethered mosquito flight
//! - **lifecycle**: Mosquito ageing, death and reproduction
//! - **transmission**: Biting window and vector–host contacts
//! - **metrics**: Compartment tallies, CSV output, progress reporting
//! - **orchestrator**: Configuration and the main simulation loop
//!
//! # Critical Invariants
//!
//! 1. All randomness flows from one seeded stream, in a fixed phase order
//! 2. Every human is in exactly one compartment; the human count never changes
//! 3. Mosquito population never exceeds its capacity, nor any pond its cap
//! 4. Compartment counts are recomputed from scratch every tick

// Module declarations
pub mod core;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod movement;
pub mod orchestrator;
pub mod rng;
pub mod seeding;
pub mod transmission;

// Re-exports for convenience
pub use core::time::TimeManager;
pub use lifecycle::{DeathCause, LifecycleOutcome, LifecycleRules};
pub use metrics::{CompartmentCounts, CsvSink, MemorySink, MetricsRow, MetricsSink};
pub use models::{
    disease::{DiseaseDurations, HumanState, VectorState},
    human::Human,
    mosquito::Mosquito,
    pond::{Pond, PondId},
    space::{Position, WorldBounds},
    state::SimulationState,
};
pub use movement::{HumanWalk, MosquitoFlight};
pub use orchestrator::{Orchestrator, RunSummary, SimulationConfig, SimulationError, TickResult};
pub use rng::{RandomSource, RngManager, ScriptedRng};
pub use transmission::{BitingWindow, ContactOutcome, TransmissionConfig};
