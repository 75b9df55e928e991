use super::appearance::Rgba;
use super::being::{DeathCause, Species};
use super::environment::{TimeOfDay, Weather};
use super::space::{Layer, Location};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a renderer needs to know about one occupied cell.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub species: Species,
    pub color: Option<Rgba>,
    pub infected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LayerSnapshot {
    pub layer: Layer,
    pub depth: usize,
    pub width: usize,
    /// Row-major, `depth * width` entries.
    pub cells: Vec<Option<CellView>>,
}

impl LayerSnapshot {
    #[must_use]
    pub fn cell(&self, location: Location) -> Option<&CellView> {
        if location.row >= self.depth || location.col >= self.width {
            return None;
        }
        self.cells[location.row * self.width + location.col].as_ref()
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    pub step: u64,
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub weather: Weather,
    pub layers: Vec<LayerSnapshot>,
}

impl FieldSnapshot {
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&LayerSnapshot> {
        self.layers.iter().find(|l| l.layer == layer)
    }

    /// "Day"/"Night" and the weather name, as shown in a status bar.
    #[must_use]
    pub fn labels(&self) -> (&'static str, &'static str) {
        (self.time_of_day.label(), self.weather.label())
    }
}

/// Head counts of the living population.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub population: usize,
    pub per_species: BTreeMap<Species, usize>,
    pub infected: usize,
}

impl PopulationStats {
    #[must_use]
    pub fn count(&self, species: Species) -> usize {
        self.per_species.get(&species).copied().unwrap_or(0)
    }

    /// Number of animal species with at least one living member.
    #[must_use]
    pub fn animal_species_alive(&self) -> usize {
        self.per_species
            .iter()
            .filter(|(s, n)| s.is_animal() && **n > 0)
            .count()
    }
}

/// Outcome of a single tick.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    pub births: usize,
    pub deaths: BTreeMap<DeathCause, usize>,
    pub infections: usize,
    pub weather_change: Option<Weather>,
    pub population: usize,
}

impl StepReport {
    #[must_use]
    pub fn total_deaths(&self) -> usize {
        self.deaths.values().sum()
    }

    #[must_use]
    pub fn deaths_by(&self, cause: DeathCause) -> usize {
        self.deaths.get(&cause).copied().unwrap_or(0)
    }
}
