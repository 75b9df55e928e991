pub mod status;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::model::config::AppConfig;
use crate::model::metrics::Metrics;
use crate::model::world::Ecosystem;
use canopy_data::StepReport;

/// How the headless loop reports each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One human-readable status line per step.
    #[default]
    Status,
    /// One JSON-encoded step report per line.
    Json,
}

/// Totals for a finished run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub population: usize,
    pub viable: bool,
    pub fingerprint: String,
}

pub struct App {
    pub config: AppConfig,
    pub ecosystem: Ecosystem,
    pub metrics: Metrics,
    pub output: OutputMode,
    pub running: bool,
}

impl App {
    /// Reads `path`, falling back to defaults when it is missing or invalid.
    pub fn load_config(path: &Path) -> AppConfig {
        match std::fs::read_to_string(path) {
            Ok(content) => match AppConfig::from_toml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Configuration loaded");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Invalid configuration, using defaults");
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No configuration file, using defaults");
            }
        }
        AppConfig::default()
    }

    /// Builds and populates an ecosystem from `config`.
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut ecosystem = Ecosystem::from_config(&config)?;
        ecosystem.populate();
        tracing::info!(
            depth = config.world.depth,
            width = config.world.width,
            fingerprint = %config.fingerprint(),
            "Ecosystem ready"
        );
        Ok(Self {
            metrics: Metrics::new(config.runtime.log_interval),
            config,
            ecosystem,
            output: OutputMode::default(),
            running: true,
        })
    }

    /// Runs the configured number of steps, writing one line per step to
    /// `out` and sleeping `runtime.step_delay_ms` between steps.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let delay = Duration::from_millis(self.config.runtime.step_delay_ms);
        self.emit_initial(out)?;

        while self.running && self.ecosystem.step_count() < self.config.runtime.steps {
            if !self.ecosystem.is_viable() {
                tracing::info!(step = self.ecosystem.step_count(), "Ecosystem no longer viable");
                break;
            }
            let started = Instant::now();
            let report = self.ecosystem.step();
            self.metrics.record_step(&report, started.elapsed());
            self.emit(out, &report)?;

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
        self.running = false;

        let summary = RunSummary {
            steps: self.ecosystem.step_count(),
            population: self.ecosystem.population().len(),
            viable: self.ecosystem.is_viable(),
            fingerprint: self.ecosystem.fingerprint(),
        };
        tracing::info!(
            steps = summary.steps,
            population = summary.population,
            births = self.metrics.births(),
            deaths = self.metrics.deaths(),
            infections = self.metrics.infections(),
            weather_changes = self.metrics.weather_changes(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(summary)
    }

    fn emit_initial<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.output == OutputMode::Status {
            writeln!(
                out,
                "{}",
                status::status_line(&self.ecosystem.snapshot(), &self.ecosystem.stats())
            )?;
        }
        Ok(())
    }

    fn emit<W: Write>(&self, out: &mut W, report: &StepReport) -> Result<()> {
        match self.output {
            OutputMode::Status => writeln!(
                out,
                "{}",
                status::status_line(&self.ecosystem.snapshot(), &self.ecosystem.stats())
            )?,
            OutputMode::Json => writeln!(out, "{}", serde_json::to_string(report)?)?,
        }
        Ok(())
    }
}
