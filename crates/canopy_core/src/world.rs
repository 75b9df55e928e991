//! The ecosystem orchestrator.
//!
//! Owns the clock, both grids, the climate, the registries, the entity
//! store and the single random stream, and advances them one tick at a time.

use crate::config::AppConfig;
use crate::environment::{Climate, DiurnalClock, WeatherLogic};
use crate::error::{CoreError, Result};
use crate::grid::{Fields, Grid};
use crate::lifecycle::{self, Age, AnimalState, Habitat, SpeciesTag, Vitals};
use crate::pathogen::DiseaseRegistry;
use crate::random::{RandomSource, SeededRandom};
use crate::species::SpeciesRegistry;
use crate::systems::{self, pathogen, ActContext, StepTally};
use canopy_data::{
    CellView, FieldSnapshot, Layer, LayerSnapshot, Location, PopulationStats, Species,
    StepReport, Weather,
};
use std::sync::Arc;

pub struct Ecosystem<R: RandomSource = SeededRandom> {
    ecs: hecs::World,
    fields: Fields,
    clock: Arc<DiurnalClock>,
    climate: Climate,
    species: SpeciesRegistry,
    diseases: DiseaseRegistry,
    /// Turn order. Survivors keep their slot; newborns join at the back.
    population: Vec<hecs::Entity>,
    rng: R,
    step: u64,
}

impl Ecosystem<SeededRandom> {
    /// Seeds from `world.seed`, or from OS entropy when unset.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(config, SeededRandom::new(config.world.seed))
    }
}

impl<R: RandomSource> Ecosystem<R> {
    /// Builds an empty ecosystem. Call [`Ecosystem::populate`] to seed it.
    pub fn new(config: &AppConfig, rng: R) -> anyhow::Result<Self> {
        config.validate()?;
        let clock = DiurnalClock::new(
            config.clock.initial_hour,
            config.clock.period,
            config.clock.night_start,
            config.clock.night_end,
        )?;
        Ok(Self::from_parts(
            config.world.depth,
            config.world.width,
            clock,
            config.climate.clone(),
            config.registry()?,
            DiseaseRegistry::new(config.pathogens.enabled.clone()),
            rng,
        )?)
    }

    pub fn from_parts(
        depth: usize,
        width: usize,
        clock: DiurnalClock,
        climate: Climate,
        species: SpeciesRegistry,
        diseases: DiseaseRegistry,
        rng: R,
    ) -> Result<Self> {
        let clock = Arc::new(clock);
        let fields = Fields::new(depth, width, Arc::clone(&clock))?;
        Ok(Self {
            ecs: hecs::World::new(),
            fields,
            clock,
            climate,
            species,
            diseases,
            population: Vec::new(),
            rng,
            step: 0,
        })
    }

    /// Clears everything and seeds a fresh random-aged population.
    ///
    /// Grids are filled fauna first, then flora, cell by cell in row-major
    /// order. Each cell tries the species living on that grid in registry
    /// order and keeps the first one whose draw succeeds.
    pub fn populate(&mut self) {
        self.ecs.clear();
        self.fields.clear_all();
        self.population.clear();
        self.step = 0;

        for layer in Layer::ALL {
            let grid = self.fields.get(layer);
            let (depth, width) = (grid.depth(), grid.width());
            for row in 0..depth {
                for col in 0..width {
                    let location = Location::new(row, col);
                    for profile in self.species.inhabiting(layer) {
                        if self.rng.chance(profile.spawn_probability) {
                            let entity = lifecycle::spawn_being(
                                &mut self.ecs,
                                &mut self.fields,
                                profile,
                                location,
                                Age::Random,
                                &mut self.rng,
                            );
                            self.population.push(entity);
                            break;
                        }
                    }
                }
            }
        }
        tracing::info!(population = self.population.len(), "Ecosystem populated");
    }

    /// Places one being and appends it to the turn order.
    pub fn spawn(&mut self, species: Species, location: Location, age: Age) -> Result<hecs::Entity> {
        let profile = self.species.profile(species)?;
        if !self.fields.get(profile.habitat).is_free(location) {
            return Err(CoreError::CellUnavailable(location));
        }
        let entity = lifecycle::spawn_being(
            &mut self.ecs,
            &mut self.fields,
            profile,
            location,
            age,
            &mut self.rng,
        );
        self.population.push(entity);
        Ok(entity)
    }

    /// Advances one tick: clock, weather, then every living being in turn
    /// order. Newborns are appended once everyone has acted.
    pub fn step(&mut self) -> StepReport {
        self.step += 1;
        self.clock.increase_time();

        let weather_change = self.climate.maybe_change(&mut self.rng);
        if let Some(weather) = weather_change {
            self.apply_weather(weather);
        }

        let mut newborns = Vec::new();
        let mut tally = StepTally::default();
        let mut ctx = ActContext {
            ecs: &mut self.ecs,
            fields: &mut self.fields,
            species: &self.species,
            rng: &mut self.rng,
            newborns: &mut newborns,
            tally: &mut tally,
        };
        for &entity in &self.population {
            if !lifecycle::is_alive(ctx.ecs, entity) {
                continue;
            }
            pathogen::expose_to_ambient(&mut ctx, entity, &self.diseases);
            systems::act(&mut ctx, entity);
        }

        let ecs = &self.ecs;
        self.population.retain(|entity| ecs.contains(*entity));
        self.population
            .extend(newborns.into_iter().filter(|entity| ecs.contains(*entity)));

        let report = tally.into_report(self.step, weather_change, self.population.len());
        tracing::debug!(
            step = self.step,
            population = report.population,
            births = report.births,
            deaths = report.total_deaths(),
            "Step complete"
        );
        report
    }

    /// Runs up to `steps` ticks, stopping early once the fauna grid is no
    /// longer viable. Returns the reports of the ticks that ran.
    pub fn simulate(&mut self, steps: u64) -> Vec<StepReport> {
        let mut reports = Vec::new();
        for _ in 0..steps {
            if !self.is_viable() {
                tracing::info!(step = self.step, "Ecosystem no longer viable");
                break;
            }
            reports.push(self.step());
        }
        reports
    }

    /// More than one species still present on the fauna grid.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        self.stats().animal_species_alive() > 1
    }

    /// Switches the weather and re-applies it to every living being.
    pub fn set_weather(&mut self, weather: Weather) {
        self.climate.current = weather;
        self.apply_weather(weather);
    }

    fn apply_weather(&mut self, weather: Weather) {
        for (_, (tag, vitals)) in self.ecs.query_mut::<(&SpeciesTag, &mut Vitals)>() {
            let Some(profile) = self.species.get(tag.0) else {
                continue;
            };
            let rescaled = weather.rescale(
                vitals.breeding_probability,
                profile.breeding_probability,
                profile.kingdom(),
            );
            vitals.set_breeding_probability(rescaled, profile);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            step: self.step,
            hour: self.clock.hour(),
            time_of_day: self.clock.time_of_day(),
            weather: self.climate.current,
            layers: Layer::ALL
                .iter()
                .map(|layer| self.layer_snapshot(*layer))
                .collect(),
        }
    }

    fn layer_snapshot(&self, layer: Layer) -> LayerSnapshot {
        let grid = self.fields.get(layer);
        LayerSnapshot {
            layer,
            depth: grid.depth(),
            width: grid.width(),
            cells: grid
                .iter()
                .map(|(_, occupant)| occupant.and_then(|e| self.cell_view(e)))
                .collect(),
        }
    }

    fn cell_view(&self, entity: hecs::Entity) -> Option<CellView> {
        let species = lifecycle::species_of(&self.ecs, entity)?;
        let (color, infected) = match self.ecs.get::<&AnimalState>(entity) {
            Ok(state) => (state.color, state.is_sick()),
            Err(_) => (None, false),
        };
        Some(CellView {
            species,
            color,
            infected,
        })
    }

    #[must_use]
    pub fn stats(&self) -> PopulationStats {
        let mut stats = PopulationStats::default();
        for &entity in &self.population {
            let Some(species) = lifecycle::species_of(&self.ecs, entity) else {
                continue;
            };
            stats.population += 1;
            *stats.per_species.entry(species).or_insert(0) += 1;
            let sick = self
                .ecs
                .get::<&AnimalState>(entity)
                .map(|state| state.is_sick())
                .unwrap_or(false);
            if sick {
                stats.infected += 1;
            }
        }
        stats
    }

    /// Checks that grids and beings agree: every living being sits in the
    /// cell its habitat records, every occupied cell holds a living being,
    /// and food and age stay within their bounds.
    pub fn verify_placement(&self) -> anyhow::Result<()> {
        let mut located = 0;
        for &entity in &self.population {
            let habitat = self
                .ecs
                .get::<&Habitat>(entity)
                .map(|h| *h)
                .map_err(|_| anyhow::anyhow!("{entity:?} is in the turn order but not alive"))?;
            let held = self.fields.get(habitat.layer).occupant_at(habitat.location);
            anyhow::ensure!(
                held == Some(entity),
                "{entity:?} records {} on {:?} but the cell holds {held:?}",
                habitat.location,
                habitat.layer
            );
            if let Ok(vitals) = self.ecs.get::<&Vitals>(entity) {
                anyhow::ensure!(
                    vitals.age <= vitals.max_age,
                    "{entity:?} is alive past its max age"
                );
            }
            if let Ok(state) = self.ecs.get::<&AnimalState>(entity) {
                anyhow::ensure!(
                    state.food_level <= state.max_food_level,
                    "{entity:?} has food {} above its max {}",
                    state.food_level,
                    state.max_food_level
                );
            }
            located += 1;
        }
        let occupied: usize = Layer::ALL
            .iter()
            .map(|layer| self.fields.get(*layer).occupied())
            .sum();
        anyhow::ensure!(
            occupied == located && self.ecs.len() as usize == located,
            "{occupied} occupied cells and {} entities for {located} beings in turn order",
            self.ecs.len()
        );
        Ok(())
    }

    /// SHA-256 of the serialized snapshot, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        if let Ok(bytes) = serde_json::to_vec(&self.snapshot()) {
            hasher.update(&bytes);
        }
        hex::encode(hasher.finalize())
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub fn clock(&self) -> &DiurnalClock {
        &self.clock
    }

    #[must_use]
    pub fn weather(&self) -> Weather {
        self.climate.current
    }

    #[must_use]
    pub fn grid(&self, layer: Layer) -> &Grid {
        self.fields.get(layer)
    }

    #[must_use]
    pub fn population(&self) -> &[hecs::Entity] {
        &self.population
    }

    #[must_use]
    pub fn species(&self) -> &SpeciesRegistry {
        &self.species
    }

    /// Entity store, for inspecting component state.
    #[must_use]
    pub fn entities(&self) -> &hecs::World {
        &self.ecs
    }

    /// Mutable entity store, for scripting scenarios.
    pub fn entities_mut(&mut self) -> &mut hecs::World {
        &mut self.ecs
    }

    /// The shared random stream, for queueing scripted draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    #[must_use]
    pub fn is_alive(&self, entity: hecs::Entity) -> bool {
        lifecycle::is_alive(&self.ecs, entity)
    }
}
