//! Wall-clock progress reporting
//!
//! Reports are driven by elapsed real time, not by tick count: after each
//! tick the reporter checks whether `interval` has passed since the last
//! report and, if so, hands a snapshot to its sink.

use crate::metrics::CompartmentCounts;
use std::time::{Duration, Instant};
use tracing::info;

/// Status handed to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub tick: usize,
    pub total_ticks: usize,
    /// Wall time since the reporter was created
    pub elapsed: Duration,
    pub humans_infected: usize,
    pub vectors_infected: usize,
    pub mosquito_total: usize,
}

pub trait ProgressSink {
    fn report(&mut self, snapshot: &ProgressSnapshot);
}

/// Logs each snapshot at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, snapshot: &ProgressSnapshot) {
        info!(
            tick = snapshot.tick,
            total_ticks = snapshot.total_ticks,
            elapsed_secs = snapshot.elapsed.as_secs_f64(),
            humans_infected = snapshot.humans_infected,
            vectors_infected = snapshot.vectors_infected,
            mosquito_total = snapshot.mosquito_total,
            "progress"
        );
    }
}

/// Rate-limits progress snapshots by wall-clock time.
pub struct ProgressReporter {
    interval: Duration,
    started: Instant,
    last_report: Instant,
    reports: usize,
    sink: Box<dyn ProgressSink>,
}

impl ProgressReporter {
    /// Reporter firing every `interval_secs` seconds; `None` when the
    /// interval is zero (progress disabled).
    pub fn every_secs(interval_secs: u64, sink: Box<dyn ProgressSink>) -> Option<Self> {
        (interval_secs > 0).then(|| Self::with_interval(Duration::from_secs(interval_secs), sink))
    }

    pub fn with_interval(interval: Duration, sink: Box<dyn ProgressSink>) -> Self {
        let now = Instant::now();
        Self {
            interval,
            started: now,
            last_report: now,
            reports: 0,
            sink,
        }
    }

    /// Number of snapshots delivered so far.
    pub fn reports(&self) -> usize {
        self.reports
    }

    /// Offer the state after `tick`; reports only if the interval has passed.
    pub fn observe(
        &mut self,
        tick: usize,
        total_ticks: usize,
        counts: &CompartmentCounts,
        mosquito_total: usize,
    ) {
        let now = Instant::now();
        if now.duration_since(self.last_report) < self.interval {
            return;
        }
        let snapshot = ProgressSnapshot {
            tick,
            total_ticks,
            elapsed: now.duration_since(self.started),
            humans_infected: counts.humans_infected,
            vectors_infected: counts.vectors_infected,
            mosquito_total,
        };
        self.sink.report(&snapshot);
        self.last_report = now;
        self.reports += 1;
    }
}
