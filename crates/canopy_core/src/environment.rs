//! Global state shared by every being: the time of day and the weather.

use crate::error::{CoreError, Result};
use crate::random::RandomSource;
use canopy_data::{Kingdom, TimeOfDay, Weather};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Cyclic hour counter with a configurable night window.
///
/// Grids hold the clock behind an `Arc` so that every grid of one
/// simulation reports the same time of day.
#[derive(Debug)]
pub struct DiurnalClock {
    hour: AtomicU32,
    period: u32,
    night_start: i64,
    night_end: i64,
}

impl DiurnalClock {
    /// Negative hour and period are taken by absolute value and the hour is
    /// reduced modulo the period. Night boundaries are kept as given, so a
    /// window that never matches yields a day-only cycle.
    pub fn new(initial_hour: i64, period: i64, night_start: i64, night_end: i64) -> Result<Self> {
        let period = period.unsigned_abs();
        if period == 0 {
            return Err(CoreError::invalid_clock("period must be non-zero"));
        }
        let period = u32::try_from(period)
            .map_err(|_| CoreError::invalid_clock(format!("period {period} is too long")))?;
        let hour = (initial_hour.unsigned_abs() % u64::from(period)) as u32;
        Ok(Self {
            hour: AtomicU32::new(hour),
            period,
            night_start,
            night_end,
        })
    }

    /// Advances one hour, wrapping at the period.
    pub fn increase_time(&self) {
        let next = (self.hour() + 1) % self.period;
        self.hour.store(next, Ordering::Relaxed);
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.hour.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn period(&self) -> u32 {
        self.period
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        let hour = i64::from(self.hour());
        if self.night_start <= self.night_end {
            hour >= self.night_start && hour <= self.night_end
        } else {
            hour >= self.night_start || hour <= self.night_end
        }
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        if self.is_night() {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }
}

pub trait WeatherLogic {
    /// New breeding probability for a being of `kingdom`, before clamping.
    fn rescale(&self, current: f64, default: f64, kingdom: Kingdom) -> f64;
}

impl WeatherLogic for Weather {
    fn rescale(&self, current: f64, default: f64, kingdom: Kingdom) -> f64 {
        match self {
            Weather::Sunny => default,
            Weather::Raining => match kingdom {
                Kingdom::Animal => current / 2.0,
                Kingdom::Plant => current * 2.0,
            },
        }
    }
}

/// The active weather plus the variants it may switch to.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Climate {
    pub current: Weather,
    pub variants: Vec<Weather>,
    pub change_probability: f64,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            current: Weather::Sunny,
            variants: Weather::ALL.to_vec(),
            change_probability: 0.1,
        }
    }
}

impl Climate {
    /// Rolls for a weather change. When it fires, a variant is picked
    /// uniformly (possibly the current one) and returned so the caller can
    /// re-apply it to the whole population.
    pub fn maybe_change<R: RandomSource>(&mut self, rng: &mut R) -> Option<Weather> {
        if self.variants.is_empty() || !rng.chance(self.change_probability) {
            return None;
        }
        let next = self.variants[rng.next_below(self.variants.len())];
        if next != self.current {
            tracing::info!(from = %self.current, to = %next, "Weather changed");
        }
        self.current = next;
        Some(next)
    }
}
