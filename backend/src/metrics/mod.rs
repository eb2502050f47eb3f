//! Compartment tallies and output sinks
//!
//! Counts are recomputed from the full population every tick. The
//! orchestrator hands sampled rows to a [`MetricsSink`]; the CSV sink writes
//! the `hora,hS,hE,hI,hR,vS,vI,mosq_total` series and, optionally, the
//! end-of-day series.

pub mod progress;

use crate::models::disease::{HumanCompartment, VectorState};
use crate::models::state::SimulationState;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

pub use progress::{LogProgress, ProgressReporter, ProgressSink, ProgressSnapshot};

/// Header of the hourly series.
pub const HOURLY_HEADER: [&str; 8] = ["hora", "hS", "hE", "hI", "hR", "vS", "vI", "mosq_total"];

/// Header of the end-of-day series.
pub const DAILY_HEADER: [&str; 8] = ["dia", "hS", "hE", "hI", "hR", "vS", "vI", "mosq_total"];

/// Population counts per compartment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentCounts {
    pub humans_susceptible: usize,
    pub humans_exposed: usize,
    pub humans_infected: usize,
    pub humans_recovered: usize,
    pub vectors_susceptible: usize,
    pub vectors_infected: usize,
}

impl CompartmentCounts {
    /// Count every agent of `state`.
    pub fn tally(state: &SimulationState) -> Self {
        let mut counts = Self::default();
        for human in state.humans() {
            match human.state.compartment() {
                HumanCompartment::Susceptible => counts.humans_susceptible += 1,
                HumanCompartment::Exposed => counts.humans_exposed += 1,
                HumanCompartment::Infected => counts.humans_infected += 1,
                HumanCompartment::Recovered => counts.humans_recovered += 1,
            }
        }
        for mosquito in state.mosquitoes() {
            match mosquito.state {
                VectorState::Susceptible => counts.vectors_susceptible += 1,
                VectorState::Infected => counts.vectors_infected += 1,
            }
        }
        counts
    }

    pub fn total_humans(&self) -> usize {
        self.humans_susceptible + self.humans_exposed + self.humans_infected + self.humans_recovered
    }

    pub fn total_vectors(&self) -> usize {
        self.vectors_susceptible + self.vectors_infected
    }
}

/// One sampled row of the hourly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRow {
    #[serde(rename = "hora")]
    pub tick: usize,
    #[serde(rename = "hS")]
    pub humans_susceptible: usize,
    #[serde(rename = "hE")]
    pub humans_exposed: usize,
    #[serde(rename = "hI")]
    pub humans_infected: usize,
    #[serde(rename = "hR")]
    pub humans_recovered: usize,
    #[serde(rename = "vS")]
    pub vectors_susceptible: usize,
    #[serde(rename = "vI")]
    pub vectors_infected: usize,
    #[serde(rename = "mosq_total")]
    pub mosquito_total: usize,
}

impl MetricsRow {
    /// `mosquito_total` is the live population size, taken separately from
    /// the per-state counts.
    pub fn new(tick: usize, counts: &CompartmentCounts, mosquito_total: usize) -> Self {
        Self {
            tick,
            humans_susceptible: counts.humans_susceptible,
            humans_exposed: counts.humans_exposed,
            humans_infected: counts.humans_infected,
            humans_recovered: counts.humans_recovered,
            vectors_susceptible: counts.vectors_susceptible,
            vectors_infected: counts.vectors_infected,
            mosquito_total,
        }
    }
}

/// Counts at the last hour of a simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRow {
    /// Day number, starting at 1
    #[serde(rename = "dia")]
    pub day: usize,
    #[serde(rename = "hS")]
    pub humans_susceptible: usize,
    #[serde(rename = "hE")]
    pub humans_exposed: usize,
    #[serde(rename = "hI")]
    pub humans_infected: usize,
    #[serde(rename = "hR")]
    pub humans_recovered: usize,
    #[serde(rename = "vS")]
    pub vectors_susceptible: usize,
    #[serde(rename = "vI")]
    pub vectors_infected: usize,
    #[serde(rename = "mosq_total")]
    pub mosquito_total: usize,
}

impl DailyRow {
    pub fn new(day: usize, counts: &CompartmentCounts, mosquito_total: usize) -> Self {
        Self {
            day,
            humans_susceptible: counts.humans_susceptible,
            humans_exposed: counts.humans_exposed,
            humans_infected: counts.humans_infected,
            humans_recovered: counts.humans_recovered,
            vectors_susceptible: counts.vectors_susceptible,
            vectors_infected: counts.vectors_infected,
            mosquito_total,
        }
    }
}

/// Destination for sampled rows.
pub trait MetricsSink {
    /// Accept one row of the hourly series.
    fn record(&mut self, row: &MetricsRow) -> Result<(), SimulationError>;

    /// Accept one end-of-day row. Ignored unless the sink wants them.
    fn record_day(&mut self, _row: &DailyRow) -> Result<(), SimulationError> {
        Ok(())
    }

    /// Push buffered output to its destination.
    fn flush(&mut self) -> Result<(), SimulationError> {
        Ok(())
    }
}

/// Collects rows in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub rows: Vec<MetricsRow>,
    pub days: Vec<DailyRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for MemorySink {
    fn record(&mut self, row: &MetricsRow) -> Result<(), SimulationError> {
        self.rows.push(*row);
        Ok(())
    }

    fn record_day(&mut self, row: &DailyRow) -> Result<(), SimulationError> {
        self.days.push(*row);
        Ok(())
    }
}

/// Writes the hourly series, and optionally the daily series, as CSV.
///
/// # Example
///
/// ```rust
/// use vectorsim_core::metrics::{CompartmentCounts, CsvSink, MetricsRow, MetricsSink};
///
/// let mut sink = CsvSink::new(Vec::new()).unwrap();
/// let counts = CompartmentCounts {
///     humans_susceptible: 3,
///     vectors_infected: 1,
///     ..Default::default()
/// };
/// sink.record(&MetricsRow::new(0, &counts, 1)).unwrap();
/// let bytes = sink.into_inner().unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "hora,hS,hE,hI,hR,vS,vI,mosq_total\n0,3,0,0,0,0,1,1\n"
/// );
/// ```
pub struct CsvSink<W: io::Write> {
    hourly: csv::Writer<W>,
    daily: Option<csv::Writer<W>>,
}

impl<W: io::Write> CsvSink<W> {
    /// Wrap `writer` and write the hourly header.
    pub fn new(writer: W) -> Result<Self, SimulationError> {
        Ok(Self {
            hourly: csv_writer(writer, &HOURLY_HEADER)?,
            daily: None,
        })
    }

    /// Also write the daily series to `writer`.
    pub fn with_daily(mut self, writer: W) -> Result<Self, SimulationError> {
        self.daily = Some(csv_writer(writer, &DAILY_HEADER)?);
        Ok(self)
    }

    /// Flush and return the hourly writer.
    pub fn into_inner(self) -> Result<W, SimulationError> {
        self.hourly
            .into_inner()
            .map_err(|e| SimulationError::Io(e.into_error()))
    }
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path` for the hourly series.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        Self::new(File::create(path)?)
    }

    /// Also write the daily series to a file at `path`.
    pub fn with_daily_file(self, path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let file = File::create(path)?;
        self.with_daily(file)
    }
}

impl<W: io::Write> MetricsSink for CsvSink<W> {
    fn record(&mut self, row: &MetricsRow) -> Result<(), SimulationError> {
        self.hourly.serialize(row)?;
        Ok(())
    }

    fn record_day(&mut self, row: &DailyRow) -> Result<(), SimulationError> {
        if let Some(daily) = &mut self.daily {
            daily.serialize(row)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        self.hourly.flush()?;
        if let Some(daily) = &mut self.daily {
            daily.flush()?;
        }
        Ok(())
    }
}

fn csv_writer<W: io::Write>(writer: W, header: &[&str]) -> Result<csv::Writer<W>, SimulationError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(header)?;
    Ok(writer)
}
