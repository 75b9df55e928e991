#[macro_use]
pub mod macros;

use canopy_lib::model::config::AppConfig;
use canopy_lib::model::data::{Location, Sex, Species};
use canopy_lib::model::lifecycle::{Age, AnimalState, Vitals};
use canopy_lib::model::random::RandomSource;
use canopy_lib::model::world::Ecosystem;
use std::collections::VecDeque;

/// Replays queued draws. Once a queue runs dry, doubles come back as 0.999
/// (so only certain events fire) and integers as 0. Shuffling is a no-op,
/// so neighbours are scanned in their fixed offset order.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    floats: VecDeque<f64>,
    ints: VecDeque<usize>,
}

#[allow(dead_code)]
impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            floats: VecDeque::new(),
            ints: VecDeque::new(),
        }
    }

    pub fn push_floats(&mut self, draws: &[f64]) {
        self.floats.extend(draws.iter().copied());
    }

    pub fn push_ints(&mut self, draws: &[usize]) {
        self.ints.extend(draws.iter().copied());
    }

    pub fn pending(&self) -> (usize, usize) {
        (self.floats.len(), self.ints.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.999)
    }

    fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        self.ints.pop_front().unwrap_or(0).min(bound - 1)
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Small, quiet worlds for scenario tests: a 3x3 field, daytime on the first
/// step, no weather changes and no diseases unless asked for.
#[allow(dead_code)]
pub struct EcosystemBuilder {
    config: AppConfig,
    beings: Vec<(Species, Location)>,
}

#[allow(dead_code)]
impl EcosystemBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.depth = 3;
        config.world.width = 3;
        config.clock.initial_hour = 9;
        config.climate.change_probability = 0.0;
        config.pathogens.enabled.clear();
        Self {
            config,
            beings: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_size(mut self, depth: usize, width: usize) -> Self {
        self.config.world.depth = depth;
        self.config.world.width = width;
        self
    }

    /// Hour the clock shows before the first step advances it.
    pub fn with_hour(mut self, hour: i64) -> Self {
        self.config.clock.initial_hour = hour;
        self
    }

    /// Beings act in the order they are added.
    pub fn with_being(mut self, species: Species, row: usize, col: usize) -> Self {
        self.beings.push((species, Location::new(row, col)));
        self
    }

    pub fn build(self) -> (Ecosystem<ScriptedRandom>, Vec<hecs::Entity>) {
        let mut eco = Ecosystem::new(&self.config, ScriptedRandom::new())
            .expect("builder config is valid");
        let handles = self
            .beings
            .into_iter()
            .map(|(species, location)| {
                eco.spawn(species, location, Age::Newborn)
                    .expect("builder cells are free")
            })
            .collect();
        (eco, handles)
    }
}

#[allow(dead_code)]
pub fn set_age<R: RandomSource>(eco: &mut Ecosystem<R>, entity: hecs::Entity, age: u32) {
    eco.entities_mut()
        .get::<&mut Vitals>(entity)
        .expect("being is alive")
        .age = age;
}

#[allow(dead_code)]
pub fn set_sex<R: RandomSource>(eco: &mut Ecosystem<R>, entity: hecs::Entity, sex: Sex) {
    eco.entities_mut()
        .get::<&mut AnimalState>(entity)
        .expect("being is an animal")
        .sex = sex;
}

#[allow(dead_code)]
pub fn set_food<R: RandomSource>(eco: &mut Ecosystem<R>, entity: hecs::Entity, food: u32) {
    eco.entities_mut()
        .get::<&mut AnimalState>(entity)
        .expect("being is an animal")
        .food_level = food;
}

#[allow(dead_code)]
pub fn set_breeding_probability<R: RandomSource>(
    eco: &mut Ecosystem<R>,
    entity: hecs::Entity,
    probability: f64,
) {
    eco.entities_mut()
        .get::<&mut Vitals>(entity)
        .expect("being is alive")
        .breeding_probability = probability;
}

#[allow(dead_code)]
pub fn animal<R: RandomSource>(eco: &Ecosystem<R>, entity: hecs::Entity) -> AnimalState {
    let state = eco
        .entities()
        .get::<&AnimalState>(entity)
        .expect("being is an animal");
    (*state).clone()
}

#[allow(dead_code)]
pub fn vitals<R: RandomSource>(eco: &Ecosystem<R>, entity: hecs::Entity) -> Vitals {
    let vitals = eco.entities().get::<&Vitals>(entity).expect("being is alive");
    (*vitals).clone()
}

#[allow(dead_code)]
pub fn infect_with<R: RandomSource>(
    eco: &mut Ecosystem<R>,
    entity: hecs::Entity,
    disease: canopy_lib::model::data::Disease,
) {
    let base = eco
        .entities()
        .get::<&canopy_lib::model::lifecycle::SpeciesTag>(entity)
        .ok()
        .and_then(|tag| eco.species().get(tag.0).and_then(|p| p.base_color));
    eco.entities_mut()
        .get::<&mut AnimalState>(entity)
        .expect("being is an animal")
        .infect(disease, base);
}
