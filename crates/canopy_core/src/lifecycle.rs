//! Being lifecycle: components, creation, ageing and death.

use crate::grid::Fields;
use crate::random::RandomSource;
use crate::species::SpeciesProfile;
use canopy_data::{DeathCause, Disease, Kingdom, Layer, Location, Rgba, Sex, Species};
use std::collections::BTreeSet;

/// Alpha applied to the colour of any diseased animal.
pub const SICK_ALPHA: u8 = 77;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesTag(pub Species);

/// State every living being carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    pub age: u32,
    pub max_age: u32,
    pub food_value: u32,
    pub breeding_probability: f64,
}

impl Vitals {
    #[must_use]
    pub fn new(age: u32, profile: &SpeciesProfile) -> Self {
        Self {
            age,
            max_age: profile.max_age,
            food_value: profile.food_value,
            breeding_probability: profile.breeding_probability,
        }
    }

    /// Never drops below the current age, so a shorter lifespan cannot kill
    /// retroactively. Non-positive input falls back to the species default.
    pub fn set_max_age(&mut self, max_age: i64, profile: &SpeciesProfile) {
        self.max_age = if max_age < i64::from(self.age) {
            self.age
        } else if max_age <= 0 {
            profile.max_age
        } else {
            u32::try_from(max_age).unwrap_or(u32::MAX)
        };
    }

    /// Saturates at 1; non-positive input falls back to the species default.
    pub fn set_breeding_probability(&mut self, probability: f64, profile: &SpeciesProfile) {
        self.breeding_probability = if probability.is_nan() || probability <= 0.0 {
            profile.breeding_probability
        } else {
            probability.min(1.0)
        };
    }

    #[must_use]
    pub fn has_outlived(&self) -> bool {
        self.age > self.max_age
    }
}

/// Where a being lives: its grid and the cell it holds there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Habitat {
    pub layer: Layer,
    pub location: Location,
}

/// Animal-only state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalState {
    pub food_level: u32,
    pub max_food_level: u32,
    pub sex: Sex,
    /// Grows only; there is no recovery.
    pub diseases: BTreeSet<Disease>,
    pub color: Option<Rgba>,
}

impl AnimalState {
    #[must_use]
    pub fn new(food_level: u32, sex: Sex, profile: &SpeciesProfile) -> Self {
        let mut state = Self {
            food_level: food_level.min(profile.max_food_level),
            max_food_level: profile.max_food_level,
            sex,
            diseases: BTreeSet::new(),
            color: None,
        };
        state.refresh_color(profile.base_color);
        state
    }

    pub fn set_food_level(&mut self, food_level: i64) {
        self.food_level = food_level.clamp(0, i64::from(self.max_food_level)) as u32;
    }

    /// Adds `amount`, capped at the maximum.
    pub fn feed(&mut self, amount: u32) {
        self.food_level = self.food_level.saturating_add(amount).min(self.max_food_level);
    }

    #[must_use]
    pub fn is_sick(&self) -> bool {
        !self.diseases.is_empty()
    }

    /// Returns true when `disease` was not held before.
    pub fn infect(&mut self, disease: Disease, base_color: Option<Rgba>) -> bool {
        let fresh = self.diseases.insert(disease);
        if fresh {
            self.refresh_color(base_color);
        }
        fresh
    }

    pub fn refresh_color(&mut self, base_color: Option<Rgba>) {
        self.color = appearance(base_color, self.sex, self.is_sick());
    }
}

/// Males are darker than females; any disease makes the colour translucent.
#[must_use]
pub fn appearance(base: Option<Rgba>, sex: Sex, sick: bool) -> Option<Rgba> {
    let mut color = base?;
    if !sex.is_female() {
        color = color.darker();
    }
    if sick {
        color = color.with_alpha(SICK_ALPHA);
    }
    Some(color)
}

/// How a new being's age is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Newborn,
    /// Uniform in `[0, max_age)`, with a matching random food level.
    Random,
}

/// Creates a being at `location` on its habitat grid.
///
/// Draw order for random ages is age, then food level, then sex.
pub fn spawn_being<R: RandomSource>(
    ecs: &mut hecs::World,
    fields: &mut Fields,
    profile: &SpeciesProfile,
    location: Location,
    age: Age,
    rng: &mut R,
) -> hecs::Entity {
    let years = match age {
        Age::Newborn => 0,
        Age::Random => rng.next_below(profile.max_age as usize) as u32,
    };
    let habitat = Habitat {
        layer: profile.habitat,
        location,
    };
    let vitals = Vitals::new(years, profile);
    let entity = match profile.kingdom() {
        Kingdom::Plant => ecs.spawn((SpeciesTag(profile.species), vitals, habitat)),
        Kingdom::Animal => {
            let food_level = match age {
                Age::Newborn => profile.max_food_level,
                Age::Random => rng.next_below(profile.max_food_level as usize) as u32,
            };
            let sex = if rng.next_below(2) == 1 {
                Sex::Female
            } else {
                Sex::Male
            };
            let state = AnimalState::new(food_level, sex, profile);
            ecs.spawn((SpeciesTag(profile.species), vitals, habitat, state))
        }
    };
    fields.get_mut(habitat.layer).place(entity, location);
    entity
}

#[must_use]
pub fn is_alive(ecs: &hecs::World, entity: hecs::Entity) -> bool {
    ecs.contains(entity)
}

#[must_use]
pub fn species_of(ecs: &hecs::World, entity: hecs::Entity) -> Option<Species> {
    ecs.get::<&SpeciesTag>(entity).ok().map(|tag| tag.0)
}

#[must_use]
pub fn habitat_of(ecs: &hecs::World, entity: hecs::Entity) -> Option<Habitat> {
    ecs.get::<&Habitat>(entity).ok().map(|h| *h)
}

/// Clears the being's cell and drops it from the world. Returns false when it
/// was already gone.
pub fn kill(
    ecs: &mut hecs::World,
    fields: &mut Fields,
    entity: hecs::Entity,
    cause: DeathCause,
) -> bool {
    let Some(habitat) = habitat_of(ecs, entity) else {
        return false;
    };
    let grid = fields.get_mut(habitat.layer);
    if grid.occupant_at(habitat.location) == Some(entity) {
        grid.clear(habitat.location);
    }
    tracing::debug!(?entity, ?cause, at = %habitat.location, "Being died");
    ecs.despawn(entity).is_ok()
}

/// Moves a being to `destination` on its own grid, vacating the old cell.
pub fn relocate(
    ecs: &mut hecs::World,
    fields: &mut Fields,
    entity: hecs::Entity,
    destination: Location,
) {
    let Ok(habitat) = ecs.query_one_mut::<&mut Habitat>(entity) else {
        return;
    };
    let grid = fields.get_mut(habitat.layer);
    if grid.occupant_at(habitat.location) == Some(entity) {
        grid.clear(habitat.location);
    }
    habitat.location = destination;
    grid.place(entity, destination);
}

/// One year older. Returns false if the being died of old age.
pub fn grow_older(ecs: &mut hecs::World, fields: &mut Fields, entity: hecs::Entity) -> bool {
    let outlived = match ecs.query_one_mut::<&mut Vitals>(entity) {
        Ok(vitals) => {
            vitals.age = vitals.age.saturating_add(1);
            vitals.has_outlived()
        }
        Err(_) => return false,
    };
    if outlived {
        kill(ecs, fields, entity, DeathCause::OldAge);
        return false;
    }
    true
}
