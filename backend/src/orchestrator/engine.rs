//! Orchestrator Engine
//!
//! Main simulation loop integrating all components.
//!
//! # Architecture
//!
//! ```text
//! For each tick t (one simulated hour):
//! 1. Humans: walk, then advance timed disease compartments
//! 2. Mosquitoes: rebuild pond occupancy, then fly / age / die / reproduce
//! 3. If the biting window is open: vector–host contacts
//! 4. Tally compartments from scratch
//! 5. Emit a row if t is a multiple of the sample interval
//!    (and an end-of-day row on the last hour of each day)
//! 6. Offer a progress snapshot
//! 7. Advance time
//! ```
//!
//! Steps 1–4 are [`Orchestrator::tick`]; [`Orchestrator::run`] adds 5–6 and
//! drives the loop to the horizon.
//!
//! # Example
//!
//! ```rust
//! use vectorsim_core::metrics::MemorySink;
//! use vectorsim_core::{Orchestrator, SimulationConfig};
//!
//! let mut config = SimulationConfig::default();
//! config.horizon_hours = 48;
//! config.humans.population = 200;
//! config.vectors.pond_count = 10;
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! let mut sink = MemorySink::new();
//! let summary = orchestrator.run(&mut sink, None).unwrap();
//!
//! assert_eq!(summary.ticks, 48);
//! assert_eq!(sink.rows.len(), 12);
//! assert_eq!(sink.days.len(), 2);
//! ```

use crate::core::time::TimeManager;
use crate::lifecycle::{run_lifecycle, LifecycleOutcome, LifecycleRules};
use crate::metrics::{CompartmentCounts, DailyRow, MetricsRow, MetricsSink, ProgressReporter};
use crate::models::disease::HumanProgression;
use crate::models::space::WorldBounds;
use crate::models::state::SimulationState;
use crate::movement::{HumanWalk, MosquitoFlight};
use crate::orchestrator::config::SimulationConfig;
use crate::rng::{RandomSource, RngManager};
use crate::seeding::populate;
use crate::transmission::{run_contacts, ContactOutcome};
use cpu_time::ProcessTime;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Simulation error types
///
/// Every variant is fatal; none can occur once the tick loop is running
/// except sink failures.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A population buffer could not be reserved
    #[error("Could not allocate {what} buffer for {requested} entries")]
    Allocation {
        what: &'static str,
        requested: usize,
    },

    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// CSV output failed
    #[error("Output error: {0}")]
    Output(#[from] csv::Error),

    /// File or stream I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Human compartment changes driven by the clock during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressionCounts {
    /// Exposed → Infected
    pub onsets: usize,
    /// Infected → Recovered
    pub recoveries: usize,
    /// Recovered → Susceptible
    pub immunity_lost: usize,
}

impl ProgressionCounts {
    fn record(&mut self, progression: HumanProgression) {
        match progression {
            HumanProgression::Onset => self.onsets += 1,
            HumanProgression::Recovery => self.recoveries += 1,
            HumanProgression::WaningImmunity => self.immunity_lost += 1,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Hour of day of this tick
    pub hour_of_day: usize,

    /// Day number (from 1) this tick belongs to
    pub day: usize,

    /// Whether this is the last hour of its day
    pub end_of_day: bool,

    /// Whether the contact phase ran
    pub biting_active: bool,

    /// Compartment counts at the end of the tick
    pub counts: CompartmentCounts,

    /// Live mosquitoes at the end of the tick
    pub mosquito_total: usize,

    pub progressions: ProgressionCounts,
    pub lifecycle: LifecycleOutcome,

    /// All zero when biting was inactive
    pub contacts: ContactOutcome,
}

/// Totals over a complete run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks executed by this call to `run`
    pub ticks: usize,
    pub rows_emitted: usize,
    pub days_emitted: usize,

    pub human_exposures: usize,
    pub vector_infections: usize,
    pub births: usize,
    pub deaths_old_age: usize,
    pub deaths_starvation: usize,

    /// Highest human Infected count seen and the first tick it occurred
    pub peak_humans_infected: usize,
    pub peak_tick: usize,

    pub final_counts: CompartmentCounts,
    pub final_mosquito_total: usize,

    pub wall_time: Duration,

    /// Process CPU time spent in `run`; `None` where the platform clock is
    /// unavailable
    pub cpu_time: Option<Duration>,
}

impl RunSummary {
    fn absorb(&mut self, result: &TickResult) {
        self.ticks += 1;
        self.human_exposures += result.contacts.human_exposures;
        self.vector_infections += result.contacts.vector_infections;
        self.births += result.lifecycle.births;
        self.deaths_old_age += result.lifecycle.deaths_old_age;
        self.deaths_starvation += result.lifecycle.deaths_starvation;
        if result.counts.humans_infected > self.peak_humans_infected {
            self.peak_humans_infected = result.counts.humans_infected;
            self.peak_tick = result.tick;
        }
        self.final_counts = result.counts;
        self.final_mosquito_total = result.mosquito_total;
    }
}

/// Main orchestrator managing simulation state and tick loop
///
/// # Determinism
///
/// All randomness is drawn from the owned `rng`, in phase order.
/// Same seed + same config = identical results.
pub struct Orchestrator<R: RandomSource = RngManager> {
    config: SimulationConfig,

    /// All agents
    state: SimulationState,

    time_manager: TimeManager,

    /// The single random stream
    rng: R,

    bounds: WorldBounds,
    walk: HumanWalk,
    flight: MosquitoFlight,
    lifecycle_rules: LifecycleRules,
}

impl Orchestrator<RngManager> {
    /// Validate `config`, seed an xorshift generator from `config.rng_seed`
    /// and build the initial population.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Orchestrator<R> {
    /// Like [`Orchestrator::new`] but drawing from the given generator.
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Result<Self, SimulationError> {
        config.validate()?;
        let state = populate(&config, &mut rng)?;
        Self::from_state(config, state, rng)
    }

    /// Start from a hand-built state instead of seeding one.
    ///
    /// The population parameters of `config` are ignored; movement,
    /// lifecycle, transmission and output parameters apply.
    pub fn from_state(
        config: SimulationConfig,
        state: SimulationState,
        rng: R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let bounds = config.bounds();
        let walk = config.human_walk();
        let flight = config.mosquito_flight();
        let lifecycle_rules = config.lifecycle_rules();

        Ok(Self {
            config,
            state,
            time_manager: TimeManager::hourly(),
            rng,
            bounds,
            walk,
            flight,
            lifecycle_rules,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current tick number
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    /// Total ticks of the run
    pub fn horizon(&self) -> usize {
        self.config.horizon_hours
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick() >= self.horizon()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Get mutable reference to simulation state
    ///
    /// This is primarily for testing. Direct state mutation bypasses
    /// orchestrator invariants.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn flight(&self) -> &MosquitoFlight {
        &self.flight
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Whether mosquitoes bite during the upcoming tick.
    pub fn biting_active(&self) -> bool {
        self.config
            .transmission
            .biting_window
            .is_open(self.time_manager.hour_of_day())
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick (phases 1–4) and advance the clock.
    pub fn tick(&mut self) -> TickResult {
        let tick = self.time_manager.current_tick();
        let hour_of_day = self.time_manager.hour_of_day();
        let day = self.time_manager.current_day() + 1;
        let end_of_day = self.time_manager.is_end_of_day();

        // STEP 1: HUMANS
        let mut progressions = ProgressionCounts::default();
        let durations = &self.config.humans.durations;
        for human in self.state.humans_mut() {
            self.walk.apply(human, &self.bounds, &mut self.rng);
            if let Some(progression) = human.state.advance(durations) {
                progressions.record(progression);
            }
        }

        // STEP 2: MOSQUITOES
        let lifecycle = run_lifecycle(
            &mut self.state,
            &self.lifecycle_rules,
            &self.flight,
            &self.bounds,
            &mut self.rng,
        );

        // STEP 3: CONTACTS
        let biting_active = self.biting_active();
        let contacts = if biting_active {
            run_contacts(&mut self.state, &self.config.transmission, &mut self.rng)
        } else {
            ContactOutcome::default()
        };

        // STEP 4: TALLY
        let counts = CompartmentCounts::tally(&self.state);
        let mosquito_total = self.state.num_mosquitoes();

        self.time_manager.advance_tick();

        TickResult {
            tick,
            hour_of_day,
            day,
            end_of_day,
            biting_active,
            counts,
            mosquito_total,
            progressions,
            lifecycle,
            contacts,
        }
    }

    /// Run the remaining ticks up to the horizon, emitting rows to `sink` and
    /// snapshots to `progress`.
    ///
    /// The sink is flushed at the end. A sink error stops the run.
    pub fn run(
        &mut self,
        sink: &mut dyn MetricsSink,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<RunSummary, SimulationError> {
        let started = Instant::now();
        let cpu_started = ProcessTime::try_now().ok();
        let horizon = self.horizon();
        let sample_interval = self.config.output.sample_interval;
        let mut summary = RunSummary::default();

        info!(
            from_tick = self.current_tick(),
            horizon,
            humans = self.state.num_humans(),
            mosquitoes = self.state.num_mosquitoes(),
            flight_radius = self.flight.radius(),
            "simulation starting"
        );

        while !self.is_finished() {
            let result = self.tick();
            summary.absorb(&result);

            if result.tick % sample_interval == 0 {
                sink.record(&MetricsRow::new(result.tick, &result.counts, result.mosquito_total))?;
                summary.rows_emitted += 1;
            }
            if result.end_of_day {
                let row = DailyRow::new(result.day, &result.counts, result.mosquito_total);
                sink.record_day(&row)?;
                summary.days_emitted += 1;
                debug!(
                    day = result.day,
                    humans_infected = result.counts.humans_infected,
                    vectors_infected = result.counts.vectors_infected,
                    mosquitoes = result.mosquito_total,
                    "day complete"
                );
            }
            if let Some(reporter) = progress.as_deref_mut() {
                reporter.observe(result.tick, horizon, &result.counts, result.mosquito_total);
            }
        }

        sink.flush()?;
        summary.wall_time = started.elapsed();
        summary.cpu_time = cpu_started.and_then(|t| t.try_elapsed().ok());

        info!(
            ticks = summary.ticks,
            rows = summary.rows_emitted,
            human_exposures = summary.human_exposures,
            vector_infections = summary.vector_infections,
            peak_humans_infected = summary.peak_humans_infected,
            peak_tick = summary.peak_tick,
            wall_secs = summary.wall_time.as_secs_f64(),
            cpu_secs = summary.cpu_time.map(|t| t.as_secs_f64()),
            "simulation complete"
        );
        Ok(summary)
    }
}
