//! Orchestrator - main simulation loop
//!
//! Owns the configuration, the population and the random stream, and drives
//! the hourly tick loop. See `engine.rs` for the loop itself and `config.rs`
//! for the parameter set and its validation.

pub mod config;
pub mod engine;

// Re-export main types for convenience
pub use config::{HumanConfig, OutputConfig, SimulationConfig, VectorConfig, WorldConfig};
pub use engine::{Orchestrator, ProgressionCounts, RunSummary, SimulationError, TickResult};
