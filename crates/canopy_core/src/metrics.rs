//! Run-level counters and logging setup.

use canopy_data::StepReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Aggregates step reports across a run.
pub struct Metrics {
    step_count: AtomicU64,
    population: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    infections: AtomicU64,
    weather_changes: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// `log_interval` of 0 turns the periodic summary off.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            step_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            infections: AtomicU64::new(0),
            weather_changes: AtomicU64::new(0),
            log_interval,
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&self, report: &StepReport, duration: Duration) {
        let steps = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population
            .store(report.population as u64, Ordering::Relaxed);
        self.births
            .fetch_add(report.births as u64, Ordering::Relaxed);
        self.deaths
            .fetch_add(report.total_deaths() as u64, Ordering::Relaxed);
        self.infections
            .fetch_add(report.infections as u64, Ordering::Relaxed);
        if report.weather_change.is_some() {
            self.weather_changes.fetch_add(1, Ordering::Relaxed);
        }

        if self.log_interval > 0 && steps % self.log_interval == 0 {
            tracing::info!(
                step = report.step,
                population = report.population,
                births = self.births.load(Ordering::Relaxed),
                deaths = self.deaths.load(Ordering::Relaxed),
                infections = self.infections.load(Ordering::Relaxed),
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn infections(&self) -> u64 {
        self.infections.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn weather_changes(&self) -> u64 {
        self.weather_changes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber on stderr, filtered by `RUST_LOG` and
/// defaulting to `info`. Later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
